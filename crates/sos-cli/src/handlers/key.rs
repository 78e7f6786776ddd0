//! Key command handler

use sos_effects::PushKeyGenerator;

/// Print `count` push keys, oldest first
pub fn handle_key(count: usize) {
    let generator = PushKeyGenerator::new();
    for _ in 0..count {
        println!("{}", generator.generate());
    }
}
