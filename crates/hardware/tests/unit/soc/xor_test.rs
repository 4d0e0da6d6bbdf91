//! # XOR Test Device Tests
//!
//! Covers the device's register map, XOR accumulation into DATA, the
//! lower-then-recheck behavior of MATCHER writes, the latched interrupt,
//! reset, and invalid accesses.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use xorsim_core::XorTest;
use xorsim_core::common::AccessError;
use xorsim_core::config::XorTestConfig;
use xorsim_core::soc::devices::Device;
use xorsim_core::soc::devices::xor_test::{A_DATA, A_MATCHER, MATCHER_RESET, TYPE_XOR_TEST};

use crate::common::harness::{init_tracing, traced_xor_test, xor_test};

fn write_data(dev: &mut XorTest, value: u32) {
    dev.write(A_DATA, value, 4).unwrap();
}

fn write_matcher(dev: &mut XorTest, value: u32) {
    dev.write(A_MATCHER, value, 4).unwrap();
}

// ─── Identification ─────────────────────────────────────────────────────────

#[test]
fn test_xor_test_name() {
    assert_eq!(xor_test().name(), TYPE_XOR_TEST);
}

#[test]
fn test_xor_test_address_range() {
    let config = XorTestConfig {
        base_addr: 0x4000_0000,
        irq_id: 3,
    };
    let dev = XorTest::new(&config, false).unwrap();
    assert_eq!(dev.address_range(), (0x4000_0000, 8));
    assert_eq!(dev.get_irq_id(), Some(3));
}

#[test]
fn test_register_table() {
    let regs = XorTest::registers();
    assert_eq!(regs.len(), 2);

    assert_eq!(regs[0].name, "DATA");
    assert_eq!(regs[0].addr, A_DATA);
    assert_eq!(regs[0].reset, 0);
    assert!(regs[0].pre_write.is_some());
    assert!(regs[0].post_write.is_none());

    assert_eq!(regs[1].name, "MATCHER");
    assert_eq!(regs[1].addr, A_MATCHER);
    assert_eq!(regs[1].reset, MATCHER_RESET);
    assert!(regs[1].pre_write.is_none());
    assert!(regs[1].post_write.is_some());
}

// ─── Reset ──────────────────────────────────────────────────────────────────

#[test]
fn test_new_device_is_reset() {
    let mut dev = xor_test();
    assert_eq!(dev.read(A_DATA, 4), Ok(0));
    assert_eq!(dev.read(A_MATCHER, 4), Ok(0xFFFF_FFFF));
    assert!(!dev.irq_level());
}

#[test]
fn test_reset_restores_values_and_lowers_irq() {
    let mut dev = xor_test();
    write_matcher(&mut dev, 0x1234);
    write_data(&mut dev, 0x1234);
    assert!(dev.irq_level());

    dev.reset();
    assert_eq!(dev.data(), 0);
    assert_eq!(dev.matcher(), MATCHER_RESET);
    assert!(!dev.irq_level());

    dev.reset();
    assert_eq!((dev.data(), dev.matcher(), dev.irq_level()), (0, MATCHER_RESET, false));
}

// ─── DATA ───────────────────────────────────────────────────────────────────

#[test]
fn test_data_accumulates_by_xor() {
    let mut dev = xor_test();
    write_data(&mut dev, 0xF0F0_0000);
    write_data(&mut dev, 0x0FF0_00FF);
    assert_eq!(dev.read(A_DATA, 4), Ok(0xFF00_00FF));
    write_data(&mut dev, 0xFF00_00FF);
    assert_eq!(dev.read(A_DATA, 4), Ok(0));
}

#[test]
fn test_data_write_matching_reset_matcher_raises_irq() {
    let mut dev = xor_test();
    write_data(&mut dev, 0xFFFF_FFFF);
    assert!(dev.irq_level());
}

#[test]
fn test_reads_have_no_side_effects() {
    let mut dev = xor_test();
    write_matcher(&mut dev, 9);
    write_data(&mut dev, 9);
    for _ in 0..3 {
        assert_eq!(dev.read(A_DATA, 4), Ok(9));
        assert_eq!(dev.read(A_MATCHER, 4), Ok(9));
    }
    assert!(dev.irq_level());
}

// ─── Scenario from reset ────────────────────────────────────────────────────

#[test]
fn test_match_latch_and_rearm_sequence() {
    let mut dev = xor_test();

    write_matcher(&mut dev, 5);
    assert!(!dev.irq_level());

    write_data(&mut dev, 5);
    assert_eq!(dev.data(), 5);
    assert_eq!(dev.matcher(), 5);
    assert!(dev.irq_level());

    // 5 ^ 5 = 0 no longer matches, but the interrupt stays latched.
    write_data(&mut dev, 5);
    assert_eq!(dev.data(), 0);
    assert!(dev.irq_level());

    // Lowered by the write, raised again by the recheck: DATA(0) == MATCHER(0).
    write_matcher(&mut dev, 0);
    assert_eq!(dev.matcher(), 0);
    assert!(dev.irq_level());

    write_matcher(&mut dev, 1);
    assert!(!dev.irq_level());
}

#[test]
fn test_traced_device_matches_untraced() {
    init_tracing();
    let mut dev = traced_xor_test(0x1000);
    write_matcher(&mut dev, 0xAB);
    write_data(&mut dev, 0xAB);
    assert!(dev.irq_level());
    assert!(dev.read(A_DATA, 1).is_err());
}

// ─── Invalid accesses ───────────────────────────────────────────────────────

#[rstest]
#[case::data_byte(A_DATA, 1)]
#[case::data_half(A_DATA, 2)]
#[case::data_dword(A_DATA, 8)]
#[case::matcher_half(A_MATCHER, 2)]
#[case::unaligned_1(0x1, 4)]
#[case::unaligned_2(0x2, 4)]
#[case::unaligned_3(0x3, 4)]
#[case::past_matcher(0x8, 4)]
#[case::far(0xFFC, 4)]
fn test_invalid_access_leaves_state_unchanged(#[case] offset: u64, #[case] size: usize) {
    let mut dev = xor_test();
    write_matcher(&mut dev, 0x77);
    write_data(&mut dev, 0x77);
    let expected = AccessError::InvalidAccess { offset, size };

    assert_eq!(dev.write(offset, 0x1234_5678, size), Err(expected));
    assert_eq!(dev.read(offset, size), Err(expected));

    assert_eq!(dev.data(), 0x77);
    assert_eq!(dev.matcher(), 0x77);
    assert!(dev.irq_level());
}

#[test]
fn test_invalid_matcher_write_does_not_lower_irq() {
    let mut dev = xor_test();
    write_data(&mut dev, MATCHER_RESET);
    assert!(dev.irq_level());
    assert!(dev.write(A_MATCHER, 0, 2).is_err());
    assert!(dev.irq_level());
}

// ─── Properties ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_first_data_write_after_reset_stores_value(v in any::<u32>()) {
        let mut dev = xor_test();
        write_data(&mut dev, v);
        prop_assert_eq!(dev.data(), v);
    }

    #[test]
    fn prop_two_data_writes_store_xor(v1 in any::<u32>(), v2 in any::<u32>()) {
        let mut dev = xor_test();
        write_data(&mut dev, v1);
        write_data(&mut dev, v2);
        prop_assert_eq!(dev.read(A_DATA, 4), Ok(v1 ^ v2));
    }

    #[test]
    fn prop_matcher_write_rechecks_from_low(data in any::<u32>(), x in any::<u32>(), latch_first in any::<bool>()) {
        let mut dev = xor_test();
        write_data(&mut dev, data);
        if latch_first {
            write_matcher(&mut dev, data);
            prop_assert!(dev.irq_level());
        }
        write_matcher(&mut dev, x);
        prop_assert_eq!(dev.irq_level(), x == data);
        prop_assert_eq!(dev.matcher(), x);
    }

    #[test]
    fn prop_mismatching_data_write_keeps_irq_high(m in any::<u32>(), v in 1..=u32::MAX) {
        let mut dev = xor_test();
        write_matcher(&mut dev, m);
        write_data(&mut dev, m);
        prop_assert!(dev.irq_level());

        write_data(&mut dev, v);
        prop_assert_ne!(dev.data(), m);
        prop_assert!(dev.irq_level());
    }

    #[test]
    fn prop_invalid_access_is_inert(
        offset in any::<u64>(),
        size in 0usize..16,
        value in any::<u32>(),
        data in any::<u32>(),
    ) {
        prop_assume!(!(size == 4 && (offset == A_DATA || offset == A_MATCHER)));
        let mut dev = xor_test();
        write_data(&mut dev, data);
        let irq = dev.irq_level();

        prop_assert_eq!(
            dev.write(offset, value, size),
            Err(AccessError::InvalidAccess { offset, size })
        );
        prop_assert!(dev.read(offset, size).is_err());
        prop_assert_eq!(dev.data(), data);
        prop_assert_eq!(dev.matcher(), MATCHER_RESET);
        prop_assert_eq!(dev.irq_level(), irq);
    }
}
