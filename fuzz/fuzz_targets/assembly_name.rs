#![no_main]

use asmident::{parse_assembly_name, AssemblyNameComponents};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for within_generic_type_argument in [false, true] {
        if let Ok((name, end)) = parse_assembly_name(text, 0, within_generic_type_argument) {
            assert!(end <= text.len());

            let canonical = name.full_name();
            let reparsed = AssemblyNameComponents::parse(&canonical)
                .unwrap_or_else(|e| panic!("{:?} did not re-parse: {}", canonical, e));
            assert_eq!(name, reparsed);
        }
    }
});
