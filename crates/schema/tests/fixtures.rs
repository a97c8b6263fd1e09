use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rstest::rstest;

use juniscan_metadata::RuntimeMetadata;
use juniscan_schema::normalize;


fn generate(metadata_file: impl AsRef<Path>) -> anyhow::Result<String> {
    let metadata = RuntimeMetadata::from_json_slice(
        &std::fs::read(metadata_file)?
    )?;
    let schema = normalize(&metadata)?;
    Ok(schema.to_sql())
}


#[rstest]
fn migration(#[files("fixtures/*/metadata.json")] metadata_file: PathBuf) {
    let case_dir = metadata_file.parent().unwrap();
    let expected_file = case_dir.join("expected.sql");

    let actual = generate(&metadata_file).unwrap();

    let expected = match std::fs::read_to_string(&expected_file) {
        Ok(expected) => expected,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            std::fs::write(case_dir.join("actual.temp.sql"), &actual).unwrap();
            return;
        }
        Err(err) => panic!("{:?}", err)
    };

    if expected != actual {
        std::fs::write(case_dir.join("actual.temp.sql"), &actual).unwrap();
        panic!("actual != expected")
    }

    assert_eq!(generate(&metadata_file).unwrap(), actual, "output is not deterministic");
}
