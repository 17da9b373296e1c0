#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Reading a configuration should never panic
    let _ = zfs_cleaner::Config::read(data);
});
