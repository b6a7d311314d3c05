/// Water the body actually gets from `volume_ml` of a drink with the given hydration
/// percentage.
pub fn actual_water_ml(volume_ml: i32, true_water_pct: f64) -> f64 {
    f64::from(volume_ml) * (true_water_pct / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_hydration_percentage() {
        assert_eq!(actual_water_ml(250, 100.0), 250.0);
        assert_eq!(actual_water_ml(200, 90.0), 180.0);
        assert_eq!(actual_water_ml(330, 0.0), 0.0);
    }
}
