#![no_main]

use libfuzzer_sys::fuzz_target;
use vd_secrets::RawConfig;

// Any JSON that parses as a raw mapping must serve lookups and
// re-serialize without panicking.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = RawConfig::from_json_str(text) else {
        return;
    };
    let _ = config.get("together", "api_key");
    let _ = config.scopes().count();
    let _ = serde_json::to_string(&config);
});
