use polyclass_core::PolyclassError;
use polyclass_data::{ClassAttribute, Header, Instance, Instances};
use std::error::Error;
use std::io::Read;
use std::path::Path;

/// Marks a missing class value.
const MISSING: &str = "?";

/// Read a labeled dataset from a CSV file.
///
/// The first row holds column names. The last column is the nominal class;
/// every other column must be numeric. Class values are sorted and
/// deduplicated to fix their indices. A class cell of `?` leaves the row
/// unlabeled.
pub fn read_instances<P: AsRef<Path>>(path: P) -> Result<Instances, Box<dyn Error>> {
    let path = path.as_ref();
    let relation = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    instances_from_reader(std::fs::File::open(path)?, &relation)
}

/// Same as [`read_instances`] for any reader.
pub fn instances_from_reader<R: Read>(reader: R, relation: &str) -> Result<Instances, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut columns: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let class_name = columns
        .pop()
        .ok_or_else(|| PolyclassError::InvalidData("CSV has no columns".into()))?;

    let mut features = Vec::new();
    let mut labels = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() != columns.len() + 1 {
            return Err(PolyclassError::InvalidData(format!(
                "row {} has {} fields, expected {}",
                line + 1,
                record.len(),
                columns.len() + 1
            ))
            .into());
        }
        let row = record
            .iter()
            .take(columns.len())
            .map(|field| {
                field.trim().parse::<f64>().map_err(|_| {
                    PolyclassError::InvalidData(format!("row {}: '{field}' is not numeric", line + 1))
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        features.push(row);
        labels.push(record[columns.len()].trim().to_string());
    }

    let mut values: Vec<String> = labels.iter().filter(|l| *l != MISSING).cloned().collect();
    values.sort();
    values.dedup();
    let class = ClassAttribute::new(class_name, values)?;

    let rows = features
        .into_iter()
        .zip(&labels)
        .map(|(x, label)| match class.index_of(label) {
            Some(c) => Instance::new(x, c),
            None => Instance::unlabeled(x),
        })
        .collect();

    let data = Instances::new(Header::new(relation, columns, class), rows)?;
    log::debug!(
        "read {} instances with {} features and {} classes",
        data.len(),
        data.num_features(),
        data.num_classes()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IRIS: &str = "\
sepal_length,petal_length,species
5.1,1.4,setosa
7.0,4.7,versicolor
6.3,6.0,virginica
4.9,1.4,setosa
5.0,1.5,?
";

    #[test]
    fn test_reads_nominal_class() {
        let data = instances_from_reader(IRIS.as_bytes(), "iris").unwrap();
        assert_eq!(data.len(), 5);
        assert_eq!(data.num_features(), 2);
        assert_eq!(data.header().class.name, "species");
        assert_eq!(data.header().class.values(), &["setosa", "versicolor", "virginica"]);
        assert_eq!(data.class_counts(), vec![2, 1, 1]);
        assert_eq!(data.instance(1).unwrap().features, vec![7.0, 4.7]);
        assert_eq!(data.instance(4).unwrap().class, None);
    }

    #[test]
    fn test_rejects_non_numeric_feature() {
        let csv = "x,label\nabc,a\n";
        assert!(instances_from_reader(csv.as_bytes(), "bad").is_err());
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iris.csv");
        std::fs::write(&path, IRIS).unwrap();
        let data = read_instances(&path).unwrap();
        assert_eq!(data.header().relation, "iris");
        assert_eq!(data.num_classes(), 3);
    }
}
