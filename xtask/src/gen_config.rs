use std::{fs::File, io::Write};

use ftalarmgen::resources::Resources;

pub(crate) fn run() {
    let config = Resources::default()
        .config()
        .expect("failed to load built-in config");
    let json = serde_json::to_string_pretty(&config).expect("failed to serialize config");
    let mut file = File::create("config.json").expect("failed to create file");
    file.write_all(json.as_bytes())
        .expect("failed to write file");
    println!("Wrote config.json, adjust it to match your PLC program.");
}
