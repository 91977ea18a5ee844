use serde::Deserialize;

/// One country summary shown on the dashboard
///
/// Never persisted; a fresh sample is fetched on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub name: String,
    pub region: String,
    pub capital: Vec<String>,
    pub population: u64,
    /// Flag image reference (URL); the cards show it as text
    pub flag: String,
}

impl Country {
    /// First capital in the list, or a placeholder when absent
    pub fn capital_display(&self) -> &str {
        self.capital
            .first()
            .map(String::as_str)
            .unwrap_or("N/A")
    }

    /// Population with thousands separators
    pub fn population_display(&self) -> String {
        format_thousands(self.population)
    }
}

/// Wire format of a country record as returned by the API when requesting
/// the restricted field set {name, population, flags, region, capital}.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryDto {
    pub name: CountryNameDto,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub flags: CountryFlagsDto,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub capital: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryNameDto {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryFlagsDto {
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub png: String,
}

impl From<CountryDto> for Country {
    fn from(dto: CountryDto) -> Self {
        let flag = if dto.flags.svg.is_empty() {
            dto.flags.png
        } else {
            dto.flags.svg
        };

        Country {
            name: dto.name.common,
            region: dto.region,
            capital: dto.capital,
            population: dto.population,
            flag,
        }
    }
}

/// Format an integer with comma thousands separators (1234567 -> "1,234,567")
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_country_payload() {
        let json = r#"[
            {
                "name": {"common": "Nigeria", "official": "Federal Republic of Nigeria"},
                "population": 206139589,
                "flags": {"svg": "https://flagcdn.com/ng.svg", "png": "https://flagcdn.com/w320/ng.png"},
                "region": "Africa",
                "capital": ["Abuja"]
            },
            {
                "name": {"common": "Bouvet Island"},
                "population": 0,
                "flags": {"png": "https://flagcdn.com/w320/bv.png"},
                "region": "Antarctic"
            }
        ]"#;

        let dtos: Vec<CountryDto> = serde_json::from_str(json).unwrap();
        let countries: Vec<Country> = dtos.into_iter().map(Country::from).collect();

        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].name, "Nigeria");
        assert_eq!(countries[0].capital_display(), "Abuja");
        assert_eq!(countries[0].flag, "https://flagcdn.com/ng.svg");

        // Missing capital list falls back to the placeholder; missing svg
        // falls back to the png reference
        assert_eq!(countries[1].capital_display(), "N/A");
        assert_eq!(countries[1].flag, "https://flagcdn.com/w320/bv.png");
    }

    #[test]
    fn test_capital_fallback_on_empty_list() {
        let country = Country {
            name: "Nauru".to_string(),
            region: "Oceania".to_string(),
            capital: Vec::new(),
            population: 10_834,
            flag: String::new(),
        };
        assert_eq!(country.capital_display(), "N/A");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(10_834), "10,834");
        assert_eq!(format_thousands(206_139_589), "206,139,589");
    }
}
