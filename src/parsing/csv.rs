use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parsing::row::CensusRow;
use crate::parsing::ParseError;

/// Source column names for each field of a [`CensusRow`].
///
/// The default matches the corrected census transcriptions; other vintages
/// can supply their own mapping as JSON. Fields omitted from the JSON keep
/// their default column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub house_number: String,
    pub birth_year: String,
    pub job: String,
    /// Optional: missing from the file means no origin for anyone
    pub origin: String,
    /// Optional: missing from the file means no children for anyone
    pub children_first_names: String,
    /// Optional: missing from the file means unknown children birth years
    pub children_birth_years: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            first_name: "chef_prenom".to_string(),
            last_name: "chef_nom".to_string(),
            street: "nom_rue".to_string(),
            house_number: "no_maison".to_string(),
            birth_year: "chef_annee_naissance".to_string(),
            job: "chef_vocation".to_string(),
            origin: "chef_origine".to_string(),
            children_first_names: "enfants_dans_la_commune_prenom".to_string(),
            children_birth_years: "enfants_annee_naissance".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Load a mapping from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read or
    /// `ParseError::Mapping` if it is not a valid mapping.
    pub fn load_from_file(path: &Path) -> Result<Self, ParseError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// # Errors
    ///
    /// Returns `ParseError::Mapping` if `json` is not a valid mapping.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Column positions resolved against one file's header
struct ColumnIndex {
    first_name: usize,
    last_name: usize,
    street: usize,
    house_number: usize,
    birth_year: usize,
    job: usize,
    origin: Option<usize>,
    children_first_names: Option<usize>,
    children_birth_years: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &[String], columns: &ColumnMapping) -> Result<Self, ParseError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| find(name).ok_or_else(|| ParseError::MissingColumn(name.to_string()));

        Ok(Self {
            first_name: require(&columns.first_name)?,
            last_name: require(&columns.last_name)?,
            street: require(&columns.street)?,
            house_number: require(&columns.house_number)?,
            birth_year: require(&columns.birth_year)?,
            job: require(&columns.job)?,
            origin: find(&columns.origin),
            children_first_names: find(&columns.children_first_names),
            children_birth_years: find(&columns.children_birth_years),
        })
    }
}

/// Read a census snapshot from a delimited text file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, `ParseError::Csv`
/// if it is not valid delimited text, or `ParseError::MissingColumn` if a
/// required column is absent from its header.
pub fn read_snapshot_file(
    path: &Path,
    delimiter: u8,
    columns: &ColumnMapping,
) -> Result<Vec<CensusRow>, ParseError> {
    let file = std::fs::File::open(path)?;
    let rows = read_snapshot(file, delimiter, columns)?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read census rows from any reader with a header line.
///
/// Cells are taken verbatim; empty cells become `None`. Invalid UTF-8 is
/// replaced rather than rejected, since older transcriptions mix encodings.
///
/// # Errors
///
/// Returns `ParseError::Csv` on malformed input or `ParseError::MissingColumn`
/// if a required column is absent from the header.
pub fn read_snapshot<R: Read>(
    reader: R,
    delimiter: u8,
    columns: &ColumnMapping,
) -> Result<Vec<CensusRow>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();
    let index = ColumnIndex::resolve(&headers, columns)?;

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        let cell = |i: usize| {
            record
                .get(i)
                .filter(|v| !v.is_empty())
                .map(|v| String::from_utf8_lossy(v).into_owned())
        };
        let optional_cell = |i: Option<usize>| i.and_then(cell);

        rows.push(CensusRow {
            first_name: cell(index.first_name),
            last_name: cell(index.last_name),
            street: cell(index.street),
            house_number: cell(index.house_number),
            birth_year: cell(index.birth_year),
            job: cell(index.job),
            origin: optional_cell(index.origin),
            children_first_names: optional_cell(index.children_first_names),
            children_birth_years: optional_cell(index.children_birth_years),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "chef_prenom;chef_nom;nom_rue;no_maison;chef_annee_naissance;chef_vocation;chef_origine;enfants_dans_la_commune_prenom;enfants_annee_naissance";

    #[test]
    fn test_read_snapshot_default_columns() {
        let text = format!(
            "{HEADER}\nJean;Dupont;Rue de Bourg;12;1790;boulanger;Lausanne;Paul|Marie;1820|1822\n·;·;Rue Centrale;3;;;;;\n"
        );
        let rows = read_snapshot(text.as_bytes(), b';', &ColumnMapping::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            CensusRow::named("Jean", "Dupont")
                .with_address("Rue de Bourg", "12")
                .with_birth_year("1790")
                .with_job("boulanger")
                .with_origin("Lausanne")
                .with_children("Paul|Marie", "1820|1822")
        );
        assert_eq!(rows[1].first_name.as_deref(), Some("·"));
        assert_eq!(rows[1].birth_year, None);
        assert_eq!(rows[1].origin, None);
    }

    #[test]
    fn test_optional_columns_may_be_missing() {
        let text = "chef_prenom;chef_nom;nom_rue;no_maison;chef_annee_naissance;chef_vocation\nJean;Dupont;Rue de Bourg;12;1790;boulanger\n";
        let rows = read_snapshot(text.as_bytes(), b';', &ColumnMapping::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].origin, None);
        assert_eq!(rows[0].children_first_names, None);
    }

    #[test]
    fn test_required_column_missing() {
        let text = "chef_prenom;nom_rue\nJean;Rue de Bourg\n";
        let err = read_snapshot(text.as_bytes(), b';', &ColumnMapping::default()).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn(ref c) if c == "chef_nom"));
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let text = format!("{HEADER}\nJean;Dupont;Rue de Bourg\n");
        let rows = read_snapshot(text.as_bytes(), b';', &ColumnMapping::default()).unwrap();
        assert_eq!(rows[0].street.as_deref(), Some("Rue de Bourg"));
        assert_eq!(rows[0].house_number, None);
    }

    #[test]
    fn test_custom_mapping_from_json() {
        let mapping = ColumnMapping::from_json(r#"{"job": "chef_vocation_norm"}"#).unwrap();
        assert_eq!(mapping.job, "chef_vocation_norm");
        assert_eq!(mapping.first_name, "chef_prenom");

        let text = "chef_prenom,chef_nom,nom_rue,no_maison,chef_annee_naissance,chef_vocation_norm\nJean,Dupont,Rue de Bourg,12,1790,vigneron\n";
        let rows = read_snapshot(text.as_bytes(), b',', &mapping).unwrap();
        assert_eq!(rows[0].job.as_deref(), Some("vigneron"));
    }

    #[test]
    fn test_invalid_mapping_json() {
        assert!(matches!(
            ColumnMapping::from_json("{not json"),
            Err(ParseError::Mapping(_))
        ));
    }

    #[test]
    fn test_latin1_bytes_are_replaced() {
        let mut bytes = b"chef_prenom;chef_nom;nom_rue;no_maison;chef_annee_naissance;chef_vocation\n".to_vec();
        bytes.extend_from_slice(b"Jos\xe9;Dupont;Rue;1;1790;vigneron\n");
        let rows = read_snapshot(bytes.as_slice(), b';', &ColumnMapping::default()).unwrap();
        assert_eq!(rows[0].first_name.as_deref(), Some("Jos\u{FFFD}"));
    }
}
