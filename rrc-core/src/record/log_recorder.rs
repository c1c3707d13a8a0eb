use super::{Record, RecordValue, Recorder};
use log::{log, Level};

/// A recorder writing each record as a single log line.
///
/// Keys are sorted so that lines of the same kind line up.
pub struct LogRecorder {
    level: Level,
}

impl Default for LogRecorder {
    fn default() -> Self {
        Self { level: Level::Debug }
    }
}

impl LogRecorder {
    /// Constructs a recorder logging at the given level.
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    fn format(record: &Record) -> String {
        let mut keys: Vec<_> = record.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|k| record.get(k).map(|v| (k, v)))
            .map(|(k, v)| match v {
                RecordValue::Scalar(v) => format!("{}={}", k, v),
                RecordValue::DateTime(v) => format!("{}={}", k, v),
                RecordValue::Array1(v) => format!("{}={:?}", k, v),
                RecordValue::String(v) => format!("{}={}", k, v),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Recorder for LogRecorder {
    fn write(&mut self, record: Record) {
        log!(self.level, "{}", Self::format(&record));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_sorted() {
        let record = Record::from_slice(&[
            ("xy_fail", RecordValue::Scalar(1.0)),
            ("goal", RecordValue::Array1(vec![0.5, 0.25])),
            ("mode", RecordValue::String("Following".to_string())),
        ]);
        assert_eq!(
            LogRecorder::format(&record),
            "goal=[0.5, 0.25], mode=Following, xy_fail=1"
        );
    }
}
