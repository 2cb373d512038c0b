use std::f32::consts::PI;

/// Phase in radians after `index` of `length` steps of a tone completing `cycles` periods.
pub fn cycle_phase(cycles: f32, index: usize, length: usize) -> f32 {
    if length == 0 {
        return 0.0;
    }
    2.0 * PI * cycles * index as f32 / length as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_length_completes_the_cycles() {
        assert!((cycle_phase(3.0, 8, 8) - 6.0 * PI).abs() < 1e-5);
        assert_eq!(cycle_phase(3.0, 0, 8), 0.0);
        assert_eq!(cycle_phase(1.0, 4, 0), 0.0);
    }
}
