//! Walkthrough of the two strategy styles: the default byte-span hash on a
//! raw byte key, and a composite key hashed field by field.
//!
//! Run with `RUST_LOG=debug` to see table creation and growth events.

use chain_hashmap::{one_at_a_time, ChainedHashMap, MapError, OneAtATime, StdEq};
use tracing_subscriber::EnvFilter;

struct Student<'a> {
    university: &'a str,
    student_id: &'a str,
}

// Never hash the struct's raw bytes; combine per-field hashes instead.
fn student_hash(s: &Student<'_>) -> u64 {
    let uni = one_at_a_time(s.university.as_bytes());
    let sid = one_at_a_time(s.student_id.as_bytes());
    let sum = uni.wrapping_add(sid);
    (sum << 5) ^ sum
}

fn student_eq(a: &Student<'_>, b: &Student<'_>) -> bool {
    a.university == b.university && a.student_id == b.student_id
}

fn main() -> Result<(), MapError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let k: [u8; 9] = *b"blah blah";
    let v1: u32 = 0xDEAD_BEEF;
    let probe = k.to_vec();

    let mut hm: ChainedHashMap<&[u8], &u32, _, _> = ChainedHashMap::new(OneAtATime, StdEq)?;
    hm.insert(&k, &v1)?;
    match hm.get(&probe.as_slice()) {
        Some(v) => println!("{}: {:x}", String::from_utf8_lossy(&k), v),
        None => println!("{}: not found", String::from_utf8_lossy(&k)),
    }
    drop(hm);

    let s = Student {
        university: "Dalhousie",
        student_id: "BXCD43243",
    };
    let university = s.university.to_string();
    let student_id = s.student_id.to_string();

    let mut roster = ChainedHashMap::new(student_hash, student_eq)?;
    roster.insert(s, "Damien Robichaud")?;

    // A fresh key built from separately owned strings finds the same entry.
    let lookup = Student {
        university: &university,
        student_id: &student_id,
    };
    println!(
        "{}-{}: {}",
        lookup.university,
        lookup.student_id,
        roster.get(&lookup).copied().unwrap_or("<unknown>")
    );
    Ok(())
}
