/// Column names of the alarm table, in output order.
pub const COLUMNS: [&str; 6] = ["clock", "severity", "suppressed", "hostid", "host", "name"];

/// One line of the alarm table: a problem as seen on one enabled host.
///
/// `host` and `name` are always emitted empty; the columns stay so the
/// device's parser keeps its field positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRow {
    pub clock: u64,
    pub severity: u8,
    pub suppressed: bool,
    pub host_id: u64,
    pub host: String,
    pub name: String,
}

impl AlertRow {
    pub fn new(clock: u64, severity: u8, suppressed: bool, host_id: u64) -> Self {
        Self {
            clock,
            severity,
            suppressed,
            host_id,
            host: String::new(),
            name: String::new(),
        }
    }

    /// Field values in [`COLUMNS`] order, as rendered.
    pub fn values(&self) -> [String; 6] {
        [
            self.clock.to_string(),
            self.severity.to_string(),
            u8::from(self.suppressed).to_string(),
            self.host_id.to_string(),
            self.host.clone(),
            self.name.clone(),
        ]
    }
}
