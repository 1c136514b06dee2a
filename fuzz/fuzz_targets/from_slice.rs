#![no_main]

use libfuzzer_sys::fuzz_target;
use picojson::{from_slice, DefaultNumber, Value};

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = from_slice::<DefaultNumber>(data) {
        let compact = value.to_json(false);
        let reparsed: Value = picojson::from_str(&compact).unwrap();
        assert_eq!(value, reparsed);

        let pretty: Value = picojson::from_str(&value.to_json(true)).unwrap();
        assert_eq!(value, pretty);
    }
});
