/// Open/closed state of a dialog, carrying the row it was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal<T> {
    is_open: bool,
    data: Option<T>,
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Self {
            is_open: false,
            data: None,
        }
    }
}

impl<T> Modal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Opens for editing `data`, replacing whatever was held before.
    pub fn open(&mut self, data: T) {
        self.data = Some(data);
        self.is_open = true;
    }

    /// Opens with no payload, e.g. a "create" dialog.
    pub fn open_empty(&mut self) {
        self.data = None;
        self.is_open = true;
    }

    /// Closes and drops the payload.
    pub fn close(&mut self) -> Option<T> {
        self.is_open = false;
        self.data.take()
    }

    /// Flips visibility. The payload survives; only `close` drops it.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }
}
