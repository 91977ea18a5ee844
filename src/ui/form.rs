use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_input::Input;

use super::Theme;
use crate::models::RegistrationDraft;

/// Width of the label column, including the separator
const LABEL_WIDTH: u16 = 15;

/// Fields within the registration form, in focus order
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    #[default]
    StudentName,
    MatricNumber,
    CourseCode,
    CourseTitle,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::StudentName,
        FormField::MatricNumber,
        FormField::CourseCode,
        FormField::CourseTitle,
    ];

    pub fn next(self) -> Self {
        match self {
            FormField::StudentName => FormField::MatricNumber,
            FormField::MatricNumber => FormField::CourseCode,
            FormField::CourseCode => FormField::CourseTitle,
            FormField::CourseTitle => FormField::StudentName,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::StudentName => FormField::CourseTitle,
            FormField::MatricNumber => FormField::StudentName,
            FormField::CourseCode => FormField::MatricNumber,
            FormField::CourseTitle => FormField::CourseCode,
        }
    }

    fn label(self) -> &'static str {
        match self {
            FormField::StudentName => "Student Name",
            FormField::MatricNumber => "Matric Number",
            FormField::CourseCode => "Course Code",
            FormField::CourseTitle => "Course Title",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            FormField::MatricNumber => "e.g. LCU/CS/2023/001",
            _ => "<required>",
        }
    }
}

/// Registration form state: four text inputs plus the focused field
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub student_name: Input,
    pub matric_number: Input,
    pub course_code: Input,
    pub course_title: Input,
    pub focus: FormField,
}

impl RegistrationForm {
    pub fn input(&self, field: FormField) -> &Input {
        match field {
            FormField::StudentName => &self.student_name,
            FormField::MatricNumber => &self.matric_number,
            FormField::CourseCode => &self.course_code,
            FormField::CourseTitle => &self.course_title,
        }
    }

    pub fn active_input_mut(&mut self) -> &mut Input {
        match self.focus {
            FormField::StudentName => &mut self.student_name,
            FormField::MatricNumber => &mut self.matric_number,
            FormField::CourseCode => &mut self.course_code,
            FormField::CourseTitle => &mut self.course_title,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Snapshot of the current values; validation happens on submit
    pub fn draft(&self) -> RegistrationDraft {
        RegistrationDraft::new(
            self.student_name.value(),
            self.matric_number.value(),
            self.course_code.value(),
            self.course_title.value(),
        )
    }

    /// Clear every field and reset focus
    pub fn reset(&mut self) {
        *self = RegistrationForm::default();
    }
}

/// Render the registration form panel
pub fn render_form(
    frame: &mut Frame,
    area: Rect,
    form: &RegistrationForm,
    active: bool,
    theme: &Theme,
) {
    let border_style = if active {
        theme.panel_border_active
    } else {
        theme.panel_border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Register Course ", theme.panel_title))
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    for (row, field) in FormField::ALL.into_iter().enumerate() {
        if row as u16 >= inner.height {
            break;
        }

        let line_area = Rect {
            x: inner.x,
            y: inner.y + row as u16,
            width: inner.width,
            height: 1,
        };

        let input = form.input(field);
        let focused = active && form.focus == field;

        let value_style = if focused {
            theme.form_value_focused
        } else if input.value().is_empty() {
            theme.form_placeholder
        } else {
            theme.form_value
        };

        let value: &str = if input.value().is_empty() && !focused {
            field.placeholder()
        } else {
            input.value()
        };

        let line = Line::from(vec![
            Span::styled(
                format!("{:<width$}", field.label(), width = LABEL_WIDTH as usize),
                theme.form_label,
            ),
            Span::styled(value, value_style),
        ]);

        frame.render_widget(Paragraph::new(line), line_area);

        if focused {
            // Put the terminal cursor at the editing position
            let cursor_x = inner.x + LABEL_WIDTH + input.visual_cursor() as u16;
            frame.set_cursor_position(Position::new(
                cursor_x.min(inner.x + inner.width.saturating_sub(1)),
                line_area.y,
            ));
        }
    }

    // Submit hint on the last line of the panel
    if inner.height > FormField::ALL.len() as u16 {
        let hint_area = Rect {
            x: inner.x,
            y: inner.y + inner.height - 1,
            width: inner.width,
            height: 1,
        };
        let hint = if active {
            "Enter to register, Esc to go back"
        } else {
            "Press a to add a course"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, theme.help_footer)),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_through_all_fields() {
        let mut form = RegistrationForm::default();
        assert_eq!(form.focus, FormField::StudentName);

        for _ in 0..FormField::ALL.len() {
            form.focus_next();
        }
        assert_eq!(form.focus, FormField::StudentName);

        form.focus_prev();
        assert_eq!(form.focus, FormField::CourseTitle);
    }

    #[test]
    fn test_draft_snapshots_current_values() {
        let mut form = RegistrationForm::default();
        form.student_name = Input::new("Ada Obi".to_string());
        form.matric_number = Input::new("LCU/CS/2023/001".to_string());
        form.course_code = Input::new("CSC101".to_string());
        form.course_title = Input::new("Intro to Computing".to_string());

        let draft = form.draft();
        assert_eq!(draft.student_name, "Ada Obi");
        assert_eq!(draft.matric_number, "LCU/CS/2023/001");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_reset_clears_values_and_focus() {
        let mut form = RegistrationForm::default();
        form.student_name = Input::new("Ada Obi".to_string());
        form.focus = FormField::CourseCode;

        form.reset();
        assert_eq!(form.student_name.value(), "");
        assert_eq!(form.focus, FormField::StudentName);
    }
}
