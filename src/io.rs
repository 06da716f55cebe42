//!
//! File formats
//!
//! * model: json `{"init": [..], "trans": [[..], ..], "emit": [[..], ..]}`
//! * observations: one sequence per line, symbols separated by whitespace or
//!   `,`. Empty lines and text after `#` are ignored.
//!
use crate::common::Observations;
use crate::error::{HmmError, Result};
use crate::model::Model;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

///
/// Serialized form of `Model` with plain nested rows
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub init: Vec<f64>,
    pub trans: Vec<Vec<f64>>,
    pub emit: Vec<Vec<f64>>,
}

impl From<&Model> for ModelFile {
    fn from(model: &Model) -> Self {
        ModelFile {
            init: model.init().to_vec(),
            trans: model.trans().rows().into_iter().map(|r| r.to_vec()).collect(),
            emit: model.emit().rows().into_iter().map(|r| r.to_vec()).collect(),
        }
    }
}

impl TryFrom<ModelFile> for Model {
    type Error = HmmError;
    fn try_from(file: ModelFile) -> Result<Model> {
        Model::from_rows(file.init, file.trans, file.emit)
    }
}

///
/// Load a model from json. The parameters are validated as in `Model::new`.
///
pub fn read_model<P: AsRef<Path>>(path: P) -> Result<Model> {
    let reader = BufReader::new(File::open(path)?);
    let file: ModelFile = serde_json::from_reader(reader)?;
    Model::try_from(file)
}

///
/// Save a model as json.
///
pub fn write_model<P: AsRef<Path>>(path: P, model: &Model) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &ModelFile::from(model))?;
    writeln!(writer)?;
    Ok(())
}

///
/// Parse observation sequences, one per non-empty line.
///
pub fn parse_observations(text: &str) -> Result<Vec<Observations>> {
    let mut seqs = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = match line.split_once('#') {
            Some((body, _)) => body,
            None => line,
        };
        let seq = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<usize>().map_err(|_| {
                    HmmError::Parse(format!("line {}: {:?} is not a symbol", n + 1, token))
                })
            })
            .collect::<Result<Observations>>()?;
        if !seq.is_empty() {
            seqs.push(seq);
        }
    }
    Ok(seqs)
}

///
/// Read observation sequences from a file.
///
pub fn read_observations<P: AsRef<Path>>(path: P) -> Result<Vec<Observations>> {
    parse_observations(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mocks::mock_casino;

    #[test]
    fn parse_observations_format() {
        let text = "# header\n0 1 1 0\n\n2,0, 1  # comment\n   \n3\n";
        let seqs = parse_observations(text).unwrap();
        assert_eq!(seqs, vec![vec![0, 1, 1, 0], vec![2, 0, 1], vec![3]]);
    }
    #[test]
    fn parse_observations_invalid() {
        match parse_observations("0 1\n0 x 1\n") {
            Err(HmmError::Parse(message)) => assert!(message.starts_with("line 2")),
            r => panic!("unexpected {:?}", r),
        }
        assert!(parse_observations("0 -1").is_err());
    }
    #[test]
    fn model_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let m = mock_casino();
        write_model(&path, &m).unwrap();
        let m2 = read_model(&path).unwrap();
        assert_eq!(m, m2);
    }
    #[test]
    fn model_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(
            &path,
            r#"{"init": [0.5, 0.5], "trans": [[0.5, 0.5], [0.9, 0.9]], "emit": [[1.0], [1.0]]}"#,
        )
        .unwrap();
        assert!(matches!(
            read_model(&path),
            Err(HmmError::NotStochastic { row: 1, .. })
        ));

        std::fs::write(&path, "{").unwrap();
        assert!(matches!(read_model(&path), Err(HmmError::Json(_))));
        assert!(matches!(
            read_model(dir.path().join("missing.json")),
            Err(HmmError::Io(_))
        ));
    }
}
