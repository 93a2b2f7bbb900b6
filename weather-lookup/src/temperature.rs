use std::fmt;

const HOT_F: i64 = 81;
const COLD_F: i64 = 45;
const HOT_C: i64 = 27;
const COLD_C: i64 = 7;

/// Scale a forecast temperature is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Fahrenheit,
    Celsius,
}

impl TemperatureScale {
    /// Only an exact `"F"` means Fahrenheit; anything else is read as Celsius.
    pub fn from_unit(unit: &str) -> Self {
        if unit == "F" { TemperatureScale::Fahrenheit } else { TemperatureScale::Celsius }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureScale::Fahrenheit => "F",
            TemperatureScale::Celsius => "C",
        }
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse human label for a temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureClass {
    Hot,
    Cold,
    Moderate,
}

impl TemperatureClass {
    pub fn classify(temperature: i64, scale: TemperatureScale) -> Self {
        let (hot, cold) = match scale {
            TemperatureScale::Fahrenheit => (HOT_F, COLD_F),
            TemperatureScale::Celsius => (HOT_C, COLD_C),
        };

        if temperature >= hot {
            TemperatureClass::Hot
        } else if temperature <= cold {
            TemperatureClass::Cold
        } else {
            TemperatureClass::Moderate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureClass::Hot => "Hot",
            TemperatureClass::Cold => "Cold",
            TemperatureClass::Moderate => "Moderate",
        }
    }
}

impl fmt::Display for TemperatureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
