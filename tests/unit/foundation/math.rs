use super::*;

#[test]
fn fnv_is_order_sensitive() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(&[1, 2]);
    let mut b = Fnv1a64::new_default();
    b.write_bytes(&[2, 1]);
    assert_ne!(a.finish(), b.finish());
    assert_ne!(a.finish(), Fnv1a64::OFFSET_BASIS);
}

#[test]
fn mul_div255_variants_align() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn unit_to_u8_clamps() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(2.0), 255);
}
