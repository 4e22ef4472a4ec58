//! Impact - What a control change requires

/// Classification of a filter change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Changes which server-side aggregate is needed; cached data is invalid
    Refetch,
    /// Only changes how cached data is presented
    Rerender,
    /// Value was already set; nothing to do
    Unchanged,
}

impl Impact {
    pub fn needs_fetch(&self) -> bool {
        matches!(self, Impact::Refetch)
    }

    pub fn needs_render(&self) -> bool {
        !matches!(self, Impact::Unchanged)
    }

    /// Combine two changes applied together; the stronger one wins
    pub fn and(self, other: Impact) -> Impact {
        match (self, other) {
            (Impact::Refetch, _) | (_, Impact::Refetch) => Impact::Refetch,
            (Impact::Rerender, _) | (_, Impact::Rerender) => Impact::Rerender,
            _ => Impact::Unchanged,
        }
    }
}

/// Assign `value` to `field`, reporting `impact` only if it changed
pub(crate) fn assign<T: PartialEq>(field: &mut T, value: T, impact: Impact) -> Impact {
    if *field == value {
        Impact::Unchanged
    } else {
        *field = value;
        impact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_reports_unchanged() {
        let mut cluster = true;
        assert_eq!(assign(&mut cluster, true, Impact::Rerender), Impact::Unchanged);
        assert_eq!(assign(&mut cluster, false, Impact::Rerender), Impact::Rerender);
        assert!(!cluster);
    }

    #[test]
    fn test_and_prefers_refetch() {
        assert_eq!(Impact::Rerender.and(Impact::Refetch), Impact::Refetch);
        assert_eq!(Impact::Unchanged.and(Impact::Rerender), Impact::Rerender);
        assert_eq!(Impact::Unchanged.and(Impact::Unchanged), Impact::Unchanged);
    }
}
