use crate::types::{ActivityInput, Category};

// Emission factors (kg CO2 per unit).
static CAR_KG_PER_KM: f64 = 0.21;
static FLIGHT_KG_PER_HOUR: f64 = 90.0;
static ELECTRICITY_KG_PER_KWH: f64 = 0.5;
static MEAT_KG_PER_MEAL: f64 = 2.5;

// Scenario estimates above this are flagged as high impact.
static HIGH_IMPACT_KG: f64 = 100.0;

struct AdviceRule {
    category: Category,
    threshold: f64,
    tip: &'static str,
}

// Thresholds are on the raw activity quantities, in the unit each field
// is entered in (km/month, hours/year, kWh/month, meals/week).
static ADVICE_RULES: [AdviceRule; 4] = [
    AdviceRule {
        category: Category::Car,
        threshold: 100.0,
        tip: "Consider using public transport or carpooling to reduce car emissions",
    },
    AdviceRule {
        category: Category::Flight,
        threshold: 5.0,
        tip: "Try to minimize air travel or choose direct flights when possible",
    },
    AdviceRule {
        category: Category::Electricity,
        threshold: 200.0,
        tip: "Switch to energy-efficient appliances and LED bulbs",
    },
    AdviceRule {
        category: Category::Meat,
        threshold: 10.0,
        tip: "Consider reducing meat consumption and trying more plant-based meals",
    },
];

static HIGH_IMPACT_BANNER: &str =
    "Your estimated footprint for this activity is high. The tip below will make a real difference.";
static GOOD_JOB_BANNER: &str =
    "Good job! Your estimated footprint for this activity is modest.";

/// Malformed numeric input never fails the request; it counts as zero.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub fn factor(category: Category) -> f64 {
    match category {
        Category::Car => CAR_KG_PER_KM,
        Category::Flight => FLIGHT_KG_PER_HOUR,
        Category::Electricity => ELECTRICITY_KG_PER_KWH,
        Category::Meat => MEAT_KG_PER_MEAL,
    }
}

fn quantity(input: &ActivityInput, category: Category) -> f64 {
    match category {
        Category::Car => input.car_km,
        Category::Flight => input.flight_hours,
        Category::Electricity => input.electricity_kwh,
        Category::Meat => input.meat_meals,
    }
}

/// Estimated CO2 mass in kg for the given activity quantities.
pub fn estimate(input: &ActivityInput) -> f64 {
    sanitize(input.car_km) * CAR_KG_PER_KM
        + sanitize(input.flight_hours) * FLIGHT_KG_PER_HOUR
        + sanitize(input.electricity_kwh) * ELECTRICITY_KG_PER_KWH
        + sanitize(input.meat_meals) * MEAT_KG_PER_MEAL
}

/// Estimate for a single scenario category.
pub fn estimate_scenario(category: Category, value: f64) -> f64 {
    sanitize(value) * factor(category)
}

/// The "tonnes per year" figure shown next to the kg total.
pub fn annual_tonnes(total_kg: f64) -> f64 {
    total_kg / 1000.0
}

/// Threshold-triggered tips, in fixed category order.
pub fn advise(input: &ActivityInput) -> Vec<String> {
    ADVICE_RULES
        .iter()
        .filter(|rule| sanitize(quantity(input, rule.category)) > rule.threshold)
        .map(|rule| rule.tip.to_string())
        .collect()
}

/// Scenario-selector advice: a severity banner followed by the tip for
/// the selected category, if its threshold is exceeded.
pub fn advise_scenario(category: Category, value: f64) -> Vec<String> {
    let value = sanitize(value);
    let total = value * factor(category);

    let mut advice = Vec::new();
    if total > HIGH_IMPACT_KG {
        advice.push(HIGH_IMPACT_BANNER.to_string());
    } else if total > 0.0 {
        advice.push(GOOD_JOB_BANNER.to_string());
    }
    if let Some(rule) = ADVICE_RULES.iter().find(|r| r.category == category) {
        if value > rule.threshold {
            advice.push(rule.tip.to_string());
        }
    }
    advice
}
