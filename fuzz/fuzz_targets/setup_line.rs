#![no_main]

use enigma_config::{MachineConfig, Setup};
use libfuzzer_sys::fuzz_target;

const CONFIG: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ 4 3
I MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
II ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
B R (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)";

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let mut machine = MachineConfig::parse(CONFIG).unwrap().build().unwrap();
    let Ok(setup) = Setup::parse(line, machine.num_rotors()) else {
        return;
    };

    let before = machine.clone();
    match setup.apply(&mut machine) {
        Ok(()) => {
            let _ = machine.convert("HELLOWORLD").unwrap();
        }
        // A rejected setup must leave the machine as it was
        Err(_) => assert_eq!(machine.window(), before.window()),
    }
});
