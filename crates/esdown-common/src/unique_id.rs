//! Unique identifier supply for synthesized names.
//!
//! Each compilation unit owns one `UniqueIdSupplier`. Ids embed a tag derived
//! from the unit's file name, and a counter that only ever grows, so names
//! synthesized by different passes over the same unit never collide. Units
//! compiled concurrently must each use their own supplier.

/// Produces ids of the form `{unit_tag}${n}`.
#[derive(Debug, Clone)]
pub struct UniqueIdSupplier {
    unit_tag: String,
    next: u32,
}

impl UniqueIdSupplier {
    /// Create the supplier for the unit read from `file_name`.
    #[must_use]
    pub fn new(file_name: &str) -> Self {
        Self {
            unit_tag: unit_tag_for(file_name),
            next: 0,
        }
    }

    /// The identifier-safe tag of this unit.
    #[must_use]
    pub fn unit_tag(&self) -> &str {
        &self.unit_tag
    }

    /// Return the next id of this unit.
    pub fn unique_id(&mut self) -> String {
        let id = format!("{}${}", self.unit_tag, self.next);
        self.next += 1;
        id
    }

    /// Return `prefix` followed by the next id of this unit.
    pub fn fresh_name(&mut self, prefix: &str) -> String {
        let id = self.unique_id();
        format!("{prefix}{id}")
    }
}

/// Reduce a file name to an identifier-safe tag: the file stem with every
/// character outside `[A-Za-z0-9_$]` replaced by `_`.
#[must_use]
pub fn unit_tag_for(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };
    let tag: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if tag.is_empty() {
        "unit".to_string()
    } else {
        tag
    }
}

#[cfg(test)]
#[path = "tests/unique_id.rs"]
mod tests;
