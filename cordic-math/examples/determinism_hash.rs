use cordic_math::FixedPoint16;

// Prints a digest of Q3.12 encodings so two machines can compare bit-exactness.
fn main() {
    let vals: Vec<f32> = vec![
        0.0, 1.0, -1.0, 0.5, -0.5, 0.25, -0.25, 0.75, -0.75, 1.25, -1.25, 7.0, -8.0,
    ];

    let mut bytes = Vec::with_capacity(vals.len() * 2);
    for v in &vals {
        bytes.extend_from_slice(&FixedPoint16::from_f32(*v).raw().to_le_bytes());
    }

    // Elementary angles atanh(2^-k), k = 1..=15, as the rotation datapath sees them
    for k in 1..=15 {
        let angle = (2.0f64).powi(-k).atanh();
        bytes.extend_from_slice(&FixedPoint16::from_f64(angle).raw().to_le_bytes());
    }

    println!("Q312_HASH {}", sha256(&bytes));
}

fn sha256(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    let out = hasher.finalize();
    hex::encode(out)
}
