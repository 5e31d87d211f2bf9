#![no_main]

use libfuzzer_sys::fuzz_target;
use obscore::config::ExporterConfig;
use obscore::schema::ObscoreSchema;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // Malformed configurations must be rejected gracefully
    if let Ok(config) = ExporterConfig::from_toml_str(content) {
        let _ = ObscoreSchema::build(&config);
    }
});
