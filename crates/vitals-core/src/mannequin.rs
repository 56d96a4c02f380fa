use vitals_standards::ScheduleTables;

/// Maps device serials to mannequins and checks them against session rosters.
#[derive(Debug, Clone, Copy)]
pub struct MannequinValidator<'t> {
    tables: &'t ScheduleTables,
}

impl<'t> MannequinValidator<'t> {
    pub fn new(tables: &'t ScheduleTables) -> Self {
        Self { tables }
    }

    pub fn resolve_mannequin(&self, device_serial: Option<&str>) -> Option<&'t str> {
        self.tables.mannequin_for_serial(device_serial?)
    }

    /// True when both are known and the mannequin is on the session's roster.
    pub fn is_valid(&self, session: Option<&str>, mannequin: Option<&str>) -> bool {
        match (session, mannequin) {
            (Some(session), Some(mannequin)) => self
                .tables
                .roster(session)
                .iter()
                .any(|name| name == mannequin),
            _ => false,
        }
    }
}
