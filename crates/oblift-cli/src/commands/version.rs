use oblift_core::{version_string, VERSION};
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput {
    name: &'static str,
    version: &'static str,
    full: String,
}

pub fn run(json: bool) -> miette::Result<()> {
    if json {
        let output = VersionOutput {
            name: "oblift",
            version: VERSION,
            full: version_string(),
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| miette::miette!("Failed to serialize version: {}", e))?;
        println!("{json}");
    } else {
        println!("{}", version_string());
    }
    Ok(())
}
