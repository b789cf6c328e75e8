use serde::Serialize;

/// Visual role of a diff segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStyle {
    Plain,
    Inserted,
    Deleted,
    /// Used for metadata notes (e.g. an HTTP status flip), never by the text diff.
    Replaced,
}

/// Semantic colour slot; the renderer picks the concrete colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleColor {
    Foreground,
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub color: StyleColor,
    pub bold: bool,
    pub italic: bool,
}

const STYLE_TABLE: [(DiffStyle, StyleDescriptor); 4] = [
    (
        DiffStyle::Plain,
        StyleDescriptor {
            color: StyleColor::Foreground,
            bold: false,
            italic: false,
        },
    ),
    (
        DiffStyle::Inserted,
        StyleDescriptor {
            color: StyleColor::Success,
            bold: true,
            italic: false,
        },
    ),
    (
        DiffStyle::Deleted,
        StyleDescriptor {
            color: StyleColor::Error,
            bold: false,
            italic: true,
        },
    ),
    (
        DiffStyle::Replaced,
        StyleDescriptor {
            color: StyleColor::Warning,
            bold: true,
            italic: true,
        },
    ),
];

impl DiffStyle {
    pub fn descriptor(self) -> StyleDescriptor {
        STYLE_TABLE
            .iter()
            .find(|(style, _)| *style == self)
            .map(|(_, descriptor)| *descriptor)
            .unwrap_or(STYLE_TABLE[0].1)
    }

    /// Parse the `kind` field of a server-computed diff; unknown kinds are plain.
    pub fn from_kind(kind: Option<&str>) -> Self {
        match kind {
            Some("inserted") => DiffStyle::Inserted,
            Some("deleted") => DiffStyle::Deleted,
            Some("replaced") => DiffStyle::Replaced,
            _ => DiffStyle::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_has_no_emphasis() {
        let d = DiffStyle::Plain.descriptor();
        assert_eq!(d.color, StyleColor::Foreground);
        assert!(!d.bold && !d.italic);
    }

    #[test]
    fn inserted_and_deleted_are_distinguishable() {
        let ins = DiffStyle::Inserted.descriptor();
        let del = DiffStyle::Deleted.descriptor();
        assert_eq!(ins.color, StyleColor::Success);
        assert_eq!(del.color, StyleColor::Error);
        assert_ne!((ins.bold, ins.italic), (del.bold, del.italic));
    }

    #[test]
    fn replaced_is_strongest() {
        let d = DiffStyle::Replaced.descriptor();
        assert_eq!(d.color, StyleColor::Warning);
        assert!(d.bold && d.italic);
    }

    #[test]
    fn server_kinds() {
        assert_eq!(DiffStyle::from_kind(Some("inserted")), DiffStyle::Inserted);
        assert_eq!(DiffStyle::from_kind(Some("deleted")), DiffStyle::Deleted);
        assert_eq!(DiffStyle::from_kind(Some("replaced")), DiffStyle::Replaced);
        assert_eq!(DiffStyle::from_kind(Some("moved")), DiffStyle::Plain);
        assert_eq!(DiffStyle::from_kind(None), DiffStyle::Plain);
    }
}
