#![no_main]

use enigma_config::MachineConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing must never panic; a parsed config must always build
    if let Ok(config) = MachineConfig::parse(text) {
        config.build().unwrap();
    }
});
