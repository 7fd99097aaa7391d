//! Font discovery through the system font database.

use fontdb::{Database, Family, Query};

use super::types::FontData;

/// Load the regular face of `family_name` from the database.
pub(crate) fn load_font_from_db(font_db: &Database, family_name: &str) -> Option<FontData> {
    let query = Query {
        families: &[Family::Name(family_name)],
        weight: fontdb::Weight::NORMAL,
        style: fontdb::Style::Normal,
        ..Query::default()
    };
    let id = font_db.query(&query)?;
    font_db
        .with_face_data(id, |data, face_index| {
            FontData::new_with_index(data.to_vec(), face_index)
        })
        .flatten()
}

/// Name of the family the database picks for the generic monospace family.
pub(crate) fn default_monospace_family(font_db: &Database) -> Option<String> {
    let query = Query {
        families: &[Family::Monospace],
        ..Query::default()
    };
    let id = font_db.query(&query)?;
    let face = font_db.face(id)?;
    face.families.first().map(|(name, _)| name.clone())
}
