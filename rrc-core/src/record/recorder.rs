use super::Record;

/// Writes a record to an output destination with [`Recorder::write`].
pub trait Recorder {
    /// Write a record to the [`Recorder`].
    fn write(&mut self, record: Record);
}

impl<R: Recorder + ?Sized> Recorder for &mut R {
    fn write(&mut self, record: Record) {
        (**self).write(record)
    }
}
