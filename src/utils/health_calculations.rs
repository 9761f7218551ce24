use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiStatus {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiStatus::Underweight => "Underweight",
            BmiStatus::Normal => "Normal",
            BmiStatus::Overweight => "Overweight",
            BmiStatus::Obese => "Obese",
        }
    }
}

/// Body mass index from weight in kg and height in cm, rounded to one decimal.
pub fn calc_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    (bmi * 10.0).round() / 10.0
}

pub fn bmi_status(bmi: f64) -> BmiStatus {
    if bmi < 18.5 {
        BmiStatus::Underweight
    } else if bmi < 25.0 {
        BmiStatus::Normal
    } else if bmi < 30.0 {
        BmiStatus::Overweight
    } else {
        BmiStatus::Obese
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_is_rounded_to_one_decimal() {
        assert_eq!(calc_bmi(70.0, 175.0), 22.9);
        assert_eq!(calc_bmi(100.0, 200.0), 25.0);
    }

    #[test]
    fn status_bands() {
        assert_eq!(bmi_status(18.4), BmiStatus::Underweight);
        assert_eq!(bmi_status(18.5), BmiStatus::Normal);
        assert_eq!(bmi_status(24.9), BmiStatus::Normal);
        assert_eq!(bmi_status(25.0), BmiStatus::Overweight);
        assert_eq!(bmi_status(30.0), BmiStatus::Obese);
    }
}
