//! Tests for the hue-wheel color allocator.

use std::collections::HashSet;

use strata_core::{ColorAllocator, PaletteConfig};

#[test]
fn test_first_colors_of_default_palette() {
    let allocator = ColorAllocator::default();
    assert_eq!(allocator.next(0), ("#f42525".to_string(), 1));
    assert_eq!(allocator.next(1), ("#c0f425".to_string(), 2));
    assert_eq!(allocator.next(2), ("#25f48c".to_string(), 3));
    assert_eq!(allocator.next(3), ("#2559f4".to_string(), 4));
}

#[test]
fn test_twenty_four_distinct_then_repeat() {
    let allocator = ColorAllocator::default();
    let mut counter = 0;
    let mut colors = Vec::new();
    for _ in 0..24 {
        let (color, next) = allocator.next(counter);
        assert_eq!(next, counter + 1);
        colors.push(color);
        counter = next;
    }

    let distinct: HashSet<&String> = colors.iter().collect();
    assert_eq!(distinct.len(), 24);

    let (twenty_fifth, _) = allocator.next(counter);
    assert_eq!(twenty_fifth, colors[0]);
    assert_eq!(allocator.cycle_len(), 24);
}

#[test]
fn test_colors_are_six_lowercase_hex_digits() {
    let allocator = ColorAllocator::default();
    for counter in 0..48 {
        let color = allocator.color_at(counter);
        assert_eq!(color.len(), 7, "{color}");
        assert!(color.starts_with('#'));
        assert!(
            color[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
            "{color}"
        );
    }
}

#[test]
fn test_hue_sequence() {
    let allocator = ColorAllocator::default();
    let hues: Vec<u32> = (0..6).map(|c| allocator.hue(c)).collect();
    assert_eq!(hues, vec![0, 75, 150, 225, 300, 15]);
}

#[test]
fn test_custom_palette_cycle() {
    let allocator = ColorAllocator::new(&PaletteConfig {
        hue_step: 90,
        ..PaletteConfig::default()
    });
    assert_eq!(allocator.cycle_len(), 4);
    assert_eq!(allocator.color_at(0), allocator.color_at(4));
    assert_ne!(allocator.color_at(0), allocator.color_at(1));
}
