#![no_main]

use libfuzzer_sys::fuzz_target;
use obscore::config::ColumnValue;
use obscore::exporter::format_template;

fuzz_target!(|data: &[u8]| {
    let Ok(template) = std::str::from_utf8(data) else {
        return;
    };

    // Rendering must either succeed or report a formatting error, never panic
    let _ = format_template(template, |name| match name {
        "instrument" => Some(ColumnValue::from("LSSTCam")),
        "visit" => Some(ColumnValue::Int(-2024061500123)),
        "s_ra" => Some(ColumnValue::Float(359.999999)),
        "flag" => Some(ColumnValue::Bool(false)),
        _ => None,
    });
});
