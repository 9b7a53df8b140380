use std::fmt;

/// Channel capabilities the façade layer asks the host to assert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Permission {
    ManageMessages,
}

impl Permission {
    pub fn name(self) -> &'static str {
        match self {
            Permission::ManageMessages => "MANAGE_MESSAGES",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
