const MAX_FIELD_LEN: usize = 64;

/// Operation a submitted form feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
    ChangeDate,
    AddRoom,
    RemoveRoom,
    SetRoomStatus,
    HireCleaner,
    FireCleaner,
    SetCheckIn,
    SetCheckOut,
    ClientReservations,
    AdminCancel,
    AdminChangePeriod,
    AdminForceCheckIn,
    DeleteClient,
    Book,
    SelfCheckIn,
    SelfCheckOut,
    Cancel,
    DeleteAccount,
    CleanRoom,
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub input: String,
    pub masked: bool,
}

/// Modal prompt collecting one or more text fields.
#[derive(Debug, Clone)]
pub struct FormModal {
    pub kind: FormKind,
    pub title: String,
    pub hint: Option<String>,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub cursor: usize,
}

impl FormModal {
    pub fn new(kind: FormKind, title: impl Into<String>, labels: &[&'static str]) -> Self {
        Self {
            kind,
            title: title.into(),
            hint: None,
            fields: labels
                .iter()
                .copied()
                .map(|label| FormField {
                    label,
                    input: String::new(),
                    masked: false,
                })
                .collect(),
            focus: 0,
            cursor: 0,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Hide the typed characters of the field with `label`.
    pub fn masked(mut self, label: &str) -> Self {
        if let Some(field) = self.fields.iter_mut().find(|f| f.label == label) {
            field.masked = true;
        }
        self
    }

    fn current(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    fn current_len(&self) -> usize {
        self.fields.get(self.focus).map(|f| f.input.len()).unwrap_or(0)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.current_len() as isize;
        let next = (self.cursor as isize + delta).clamp(0, len);
        self.cursor = next as usize;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.current_len();
    }

    pub fn insert(&mut self, ch: char) {
        let cursor = self.cursor;
        if let Some(field) = self.current() {
            if field.input.len() >= MAX_FIELD_LEN {
                return;
            }
            if ch.is_ascii() && !ch.is_ascii_control() {
                field.input.insert(cursor, ch);
                self.cursor += 1;
            }
        }
    }

    pub fn backspace(&mut self) {
        let cursor = self.cursor;
        if cursor == 0 {
            return;
        }
        if let Some(field) = self.current() {
            if cursor <= field.input.len() {
                field.input.remove(cursor - 1);
                self.cursor -= 1;
            }
        }
    }

    pub fn delete(&mut self) {
        let cursor = self.cursor;
        if let Some(field) = self.current() {
            if cursor < field.input.len() {
                field.input.remove(cursor);
            }
        }
    }

    /// Focus the next field; returns `false` when already on the last one.
    pub fn next_field(&mut self) -> bool {
        if self.focus + 1 >= self.fields.len() {
            return false;
        }
        self.focus += 1;
        self.cursor = self.current_len();
        true
    }

    pub fn previous_field(&mut self) {
        if self.focus > 0 {
            self.focus -= 1;
            self.cursor = self.current_len();
        }
    }

    /// Raw (untrimmed) value of the field at `index`.
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.input.as_str())
            .unwrap_or("")
    }

    /// Text shown for a field, masked when needed.
    pub fn display(field: &FormField) -> String {
        if field.masked {
            "*".repeat(field.input.len())
        } else {
            field.input.clone()
        }
    }
}
