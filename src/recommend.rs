//! Rule-based trip-planning recommendations for a selected hour
//!
//! Three pure functions over `(temperature, description)`: activity
//! suggestions, clothing suggestions and a gear checklist. All are total;
//! a missing temperature yields a single "unavailable" sentinel instead of
//! running the rules. Keyword checks are case-insensitive substring matches.

use serde::Serialize;

/// Qualitative suitability rating for an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rating {
    Excellent,
    Good,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Rating {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::NotAvailable => "N/A",
        }
    }
}

/// One suggested activity with its rating and a short note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub name: &'static str,
    pub rating: Rating,
    pub note: &'static str,
}

/// One clothing suggestion with its display icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClothingItem {
    pub icon: &'static str,
    pub name: &'static str,
}

/// One gear-checklist item with its display icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GearItem {
    pub icon: &'static str,
    pub name: &'static str,
}

fn activity(name: &'static str, rating: Rating, note: &'static str) -> Activity {
    Activity { name, rating, note }
}

fn clothing_item(icon: &'static str, name: &'static str) -> ClothingItem {
    ClothingItem { icon, name }
}

fn gear_item(icon: &'static str, name: &'static str) -> GearItem {
    GearItem { icon, name }
}

/// Activity suggestions for the given conditions, at most 4
#[must_use]
pub fn activities(temperature: Option<f32>, description: &str) -> Vec<Activity> {
    let Some(temp) = temperature else {
        return vec![activity(
            "Data unavailable",
            Rating::NotAvailable,
            "Weather data is not available for this time.",
        )];
    };

    let desc = description.to_lowercase();
    let mut activities = Vec::new();

    if desc.contains("clear") || desc.contains("sun") {
        if temp > 25.0 {
            activities.push(activity(
                "Swimming",
                Rating::Excellent,
                "Perfect weather for water activities.",
            ));
            activities.push(activity(
                "Picnic",
                Rating::Good,
                "Find a shaded area and bring plenty of water.",
            ));
        } else if temp > 15.0 {
            activities.push(activity(
                "Hiking",
                Rating::Excellent,
                "Ideal temperature for outdoor trails.",
            ));
            activities.push(activity(
                "Cycling",
                Rating::Excellent,
                "Great conditions for a bike ride.",
            ));
        } else {
            activities.push(activity(
                "Walking Tour",
                Rating::Good,
                "Comfortable temperature for exploring.",
            ));
        }
    } else if desc.contains("cloud") {
        activities.push(activity(
            "Sightseeing",
            Rating::Good,
            "Overcast conditions are good for photography.",
        ));
        activities.push(activity(
            "Outdoor Dining",
            Rating::Good,
            "Not too sunny, comfortable for outdoor meals.",
        ));
    } else if desc.contains("rain") || desc.contains("drizzle") {
        activities.push(activity(
            "Museum Visit",
            Rating::Excellent,
            "Stay dry while enjoying cultural attractions.",
        ));
        activities.push(activity(
            "Shopping",
            Rating::Good,
            "Good time to explore indoor markets or malls.",
        ));
    } else if desc.contains("snow") {
        activities.push(activity(
            "Snow Activities",
            Rating::Excellent,
            "Great conditions for winter sports if available.",
        ));
        activities.push(activity(
            "Cozy Café Visit",
            Rating::Excellent,
            "Warm up with hot drinks and enjoy the snow views.",
        ));
    } else if desc.contains("fog") || desc.contains("mist") {
        activities.push(activity(
            "Indoor Activities",
            Rating::Good,
            "Limited visibility outdoors, better to stay inside.",
        ));
    } else if desc.contains("thunder") {
        activities.push(activity(
            "Indoor Entertainment",
            Rating::Excellent,
            "Stay safe indoors during thunderstorms.",
        ));
    }

    // Always suggest at least one indoor option regardless of weather
    activities.push(activity(
        "Local Cuisine",
        Rating::Good,
        "Any weather is good for trying local food.",
    ));

    activities.truncate(4);
    activities
}

/// Clothing suggestions: one temperature band plus additive keyword rules
#[must_use]
pub fn clothing(temperature: Option<f32>, description: &str) -> Vec<ClothingItem> {
    let Some(temp) = temperature else {
        return vec![clothing_item("👕", "Weather data unavailable")];
    };

    let desc = description.to_lowercase();
    let mut clothing = Vec::new();

    if temp > 30.0 {
        clothing.push(clothing_item("👕", "Light, breathable clothing"));
        clothing.push(clothing_item("👒", "Sun hat"));
        clothing.push(clothing_item("🕶️", "Sunglasses"));
    } else if temp > 20.0 {
        clothing.push(clothing_item("👕", "Light clothing"));
        clothing.push(clothing_item("🧢", "Cap or hat"));
    } else if temp > 10.0 {
        clothing.push(clothing_item("🧥", "Light jacket or sweater"));
        clothing.push(clothing_item("👖", "Long pants"));
    } else if temp > 0.0 {
        clothing.push(clothing_item("🧥", "Warm jacket"));
        clothing.push(clothing_item("🧣", "Scarf"));
        clothing.push(clothing_item("🧤", "Gloves"));
    } else {
        clothing.push(clothing_item("🧥", "Heavy winter coat"));
        clothing.push(clothing_item("🧣", "Warm scarf"));
        clothing.push(clothing_item("🧤", "Insulated gloves"));
        clothing.push(clothing_item("👢", "Winter boots"));
    }

    if desc.contains("rain") || desc.contains("drizzle") {
        clothing.push(clothing_item("☂️", "Umbrella"));
        clothing.push(clothing_item("🧥", "Waterproof jacket"));
    } else if desc.contains("snow") {
        clothing.push(clothing_item("👢", "Waterproof boots"));
        clothing.push(clothing_item("🧦", "Warm socks"));
    } else if desc.contains("wind") {
        clothing.push(clothing_item("🧥", "Windbreaker"));
    } else if desc.contains("clear") && temp > 20.0 {
        clothing.push(clothing_item("🧴", "Sunscreen"));
    }

    clothing
}

/// Gear checklist: fixed baseline plus conditional additions
#[must_use]
pub fn gear_checklist(temperature: Option<f32>, description: &str) -> Vec<GearItem> {
    let Some(temp) = temperature else {
        return vec![gear_item("❓", "Weather data unavailable")];
    };

    let desc = description.to_lowercase();
    let mut gear = vec![
        gear_item("📱", "Phone"),
        gear_item("💳", "Wallet/Money"),
        gear_item("🔑", "Keys"),
        gear_item("💧", "Water bottle"),
    ];

    if desc.contains("rain") || desc.contains("drizzle") {
        gear.push(gear_item("👟", "Waterproof footwear"));
        gear.push(gear_item("👝", "Waterproof bag"));
    } else if desc.contains("snow") {
        gear.push(gear_item("🧤", "Extra pair of gloves"));
        gear.push(gear_item("🔦", "Flashlight (shorter daylight)"));
    } else if desc.contains("clear") && temp > 25.0 {
        gear.push(gear_item("🧴", "Sunscreen"));
        gear.push(gear_item("👓", "Sunglasses"));
        gear.push(gear_item("💧", "Extra water"));
    } else if temp < 5.0 {
        gear.push(gear_item("☕", "Thermos with hot drink"));
        gear.push(gear_item("🔋", "Portable charger (cold drains batteries)"));
    }

    gear
}

/// One-sentence headline recommendation for the selected-time panel
#[must_use]
pub fn overall_note(temperature: Option<f32>, description: &str) -> &'static str {
    let Some(temp) = temperature else {
        return "Weather data unavailable";
    };
    if description.is_empty() {
        return "Weather data unavailable";
    }

    let desc = description.to_lowercase();

    if desc.contains("rain") {
        "Bring an umbrella and waterproof clothing."
    } else if desc.contains("snow") {
        "Dress warmly and wear appropriate footwear."
    } else if desc.contains("cloud") {
        "Partly cloudy conditions, but rain is unlikely."
    } else if desc.contains("clear") {
        if temp > 30.0 {
            "Very hot conditions. Stay hydrated and use sun protection."
        } else if temp > 25.0 {
            "Warm and clear. Great for outdoor activities, but use sun protection."
        } else {
            "Clear skies. Perfect for outdoor activities."
        }
    } else if desc.contains("fog") || desc.contains("mist") {
        "Reduced visibility. Drive carefully if traveling."
    } else {
        "Check forecast for updates as conditions may change."
    }
}
