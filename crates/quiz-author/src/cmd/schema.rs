use anyhow::Result;
use quiz_spec::document_schema;

pub fn run() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&document_schema())?);
    Ok(())
}
