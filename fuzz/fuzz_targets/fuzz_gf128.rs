#![no_main]

use galois_gcm::gcm::gf128;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: ([u8; 16], [u8; 16], [u8; 16])| {
    let (a, b, c) = input;

    assert_eq!(gf128::mul(&a, &b), gf128::mul(&b, &a));
    assert_eq!(gf128::mul(&gf128::mul(&a, &b), &c), gf128::mul(&a, &gf128::mul(&b, &c)));
    assert_eq!(gf128::mul(&a, &gf128::ONE), a);
    assert_eq!(gf128::mul(&a, &gf128::ZERO), gf128::ZERO);
});
