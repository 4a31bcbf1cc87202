use ndarray::Array2;

use crate::analysis::band::BandRows;
use crate::analysis::spark::SparkLocation;

/// `Energy`: mean V over the band rows, all columns.
pub fn band_energy(val: &Array2<f32>, band: BandRows) -> f64 {
    let w = val.ncols();
    let sum: f64 = (band.start..=band.end)
        .flat_map(|y| (0..w).map(move |x| val[[y, x]] as f64))
        .sum();
    sum / (band.height() * w) as f64
}

/// `NonSparkEnergy`: mean V over the band rows, columns outside the spark.
/// Falls back to `energy` when there is no spark or the remaining column
/// ranges are both empty.
pub fn non_spark_energy(
    val: &Array2<f32>,
    band: BandRows,
    spark: Option<SparkLocation>,
    energy: f64,
) -> f64 {
    let Some(spark) = spark else {
        return energy;
    };
    let w = val.ncols();
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for y in band.start..=band.end {
        for x in 0..spark.band_l {
            sum += val[[y, x]] as f64;
            count += 1;
        }
        for x in (spark.band_r + 1)..w {
            sum += val[[y, x]] as f64;
            count += 1;
        }
    }
    if count == 0 {
        energy
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_is_mean_v_over_band() {
        let val = Array2::from_shape_fn((4, 5), |(y, _)| if y == 1 || y == 2 { 100.0 } else { 0.0 });
        let band = BandRows { start: 1, end: 2 };
        assert!((band_energy(&val, band) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn non_spark_energy_excludes_spark_columns() {
        let val = Array2::from_shape_fn((1, 10), |(_, x)| if (3..=5).contains(&x) { 200.0 } else { 50.0 });
        let band = BandRows { start: 0, end: 0 };
        let spark = SparkLocation { idx: 5, band_l: 3, band_r: 5 };
        let energy = band_energy(&val, band);
        let n = non_spark_energy(&val, band, Some(spark), energy);
        assert!((n - 50.0).abs() < 1e-6);
    }

    #[test]
    fn non_spark_energy_falls_back_when_no_spark() {
        let val = Array2::from_shape_fn((1, 4), |_| 77.0);
        let band = BandRows { start: 0, end: 0 };
        let energy = band_energy(&val, band);
        assert_eq!(non_spark_energy(&val, band, None, energy), energy);
    }
}
