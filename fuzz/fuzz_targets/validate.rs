#![no_main]

use libfuzzer_sys::fuzz_target;
use picojson::{from_slice, validate, DefaultNumber};

fuzz_target!(|data: &[u8]| {
    // Whatever parses into a value must also validate. The converse does not
    // hold: validation leaves numerals and string encoding unchecked.
    if from_slice::<DefaultNumber>(data).is_ok() {
        validate(data).unwrap();
    }
});
