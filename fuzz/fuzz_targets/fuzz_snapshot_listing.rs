#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(output) = std::str::from_utf8(data) {
        // Parsing and sieving a listing should never panic
        if let Ok(mut list) = zfs_cleaner::SnapshotList::from_output(output, "tank") {
            let start = list
                .latest()
                .and_then(|s| s.creation.checked_sub_signed(chrono::Duration::days(30)));
            if let Some(start) = start {
                list.sieve(start, chrono::Duration::days(1));
            }
        }
    }
});
