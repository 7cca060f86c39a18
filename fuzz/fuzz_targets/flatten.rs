#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    bordersweeper::arbtests::flatten(&mut Unstructured::new(data)).unwrap();
});
