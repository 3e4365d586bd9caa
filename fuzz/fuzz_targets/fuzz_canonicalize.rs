#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(der) = dercanon::canonicalize(data) {
        // Canonical output must be a fixed point of canonicalization.
        let again = dercanon::canonicalize(&der).expect("canonical output failed to reparse");
        assert_eq!(der, again);
    }
});
