//! Reading census snapshots into the uniform row schema.
//!
//! Census datasets from different years name their columns differently.
//! This module projects them onto [`CensusRow`](row::CensusRow), the only
//! shape the person builder understands:
//!
//! - **Delimited text** (`;` in the original transcriptions, `,` or tab
//!   elsewhere), with a header line naming the columns
//! - **Column mapping**: a JSON file renaming any of the expected columns
//!
//! ## Expected columns
//!
//! | Field | Default column | Required |
//! |-------|----------------|----------|
//! | first name | `chef_prenom` | Yes |
//! | last name | `chef_nom` | Yes |
//! | street | `nom_rue` | Yes |
//! | house number | `no_maison` | Yes |
//! | birth year | `chef_annee_naissance` | Yes |
//! | job | `chef_vocation` | Yes |
//! | origin | `chef_origine` | No |
//! | children first names | `enfants_dans_la_commune_prenom` | No |
//! | children birth years | `enfants_annee_naissance` | No |

use thiserror::Error;

pub mod csv;
pub mod row;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid delimited text: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Invalid column mapping: {0}")]
    Mapping(#[from] serde_json::Error),
}
