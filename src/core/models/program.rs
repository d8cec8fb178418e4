//! Degree program model

use serde::{Deserialize, Serialize};

/// Kind of declared program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    /// Declared major (`MAJOR:` line)
    Major,
    /// Declared certificate (`CERTIF:` line)
    Certificate,
}

/// A major or certificate declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDeclaration {
    /// Declaration date as printed ("MM/DD/YY")
    pub date_declared: String,
    /// Numeric program code
    pub code: String,
    /// Program name
    pub name: String,
    /// Major or certificate
    #[serde(rename = "type")]
    pub kind: ProgramKind,
}

/// Programs, college and degree type named in the report header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeProgram {
    /// Declared majors in report order
    pub majors: Vec<ProgramDeclaration>,
    /// Declared certificates in report order
    pub certificates: Vec<ProgramDeclaration>,
    /// First major, else first certificate
    pub primary_program: Option<ProgramDeclaration>,
    /// Degree type (e.g., "Bachelor of Science")
    pub degree_type: String,
    /// College name (e.g., "Letters & Science")
    pub college: String,
}

impl DegreeProgram {
    /// Pick the primary program: the first major, else the first certificate
    pub fn resolve_primary(&mut self) {
        self.primary_program = self
            .majors
            .first()
            .or_else(|| self.certificates.first())
            .cloned();
    }

    /// Whether neither a major nor a certificate was declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.majors.is_empty() && self.certificates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(name: &str, kind: ProgramKind) -> ProgramDeclaration {
        ProgramDeclaration {
            date_declared: "09/01/22".to_string(),
            code: "123".to_string(),
            name: name.to_string(),
            kind,
        }
    }

    #[test]
    fn test_primary_prefers_major() {
        let mut program = DegreeProgram {
            majors: vec![declaration("Computer Sciences", ProgramKind::Major)],
            certificates: vec![declaration("Data Science Certificate", ProgramKind::Certificate)],
            ..DegreeProgram::default()
        };
        program.resolve_primary();
        assert_eq!(
            program.primary_program.map(|p| p.name),
            Some("Computer Sciences".to_string())
        );
    }

    #[test]
    fn test_primary_falls_back_to_certificate() {
        let mut program = DegreeProgram {
            certificates: vec![declaration("Business Certificate", ProgramKind::Certificate)],
            ..DegreeProgram::default()
        };
        program.resolve_primary();
        assert_eq!(
            program.primary_program.map(|p| p.kind),
            Some(ProgramKind::Certificate)
        );
    }

    #[test]
    fn test_empty_program() {
        let mut program = DegreeProgram::default();
        program.resolve_primary();
        assert!(program.is_empty());
        assert!(program.primary_program.is_none());
    }
}
