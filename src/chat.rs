use crate::types::{ChatRole, ChatTurn};

const CAR_REPLY: &str = "Transport is usually the biggest single piece of a personal footprint. \
    Driving 100 km in a typical petrol car releases around 21 kg of CO2, so combining errands, \
    carpooling, or moving short trips to public transport or a bicycle pays off quickly.";

const FLIGHT_REPLY: &str = "Flying is very carbon intensive, roughly 90 kg of CO2 for every hour \
    in the air. Choose direct routes when you fly, take the train for shorter journeys, and \
    consider fewer, longer trips instead of frequent short ones.";

const ELECTRICITY_REPLY: &str = "Household electricity adds up fast. LED bulbs, unplugging idle \
    devices, and running appliances on eco settings all cut usage, and a renewable tariff lowers \
    the footprint of every kWh you still use.";

const MEAT_REPLY: &str = "Food choices matter. A meat meal accounts for about 2.5 kg of CO2, so \
    swapping a few meals each week for plant-based options is one of the easiest reductions \
    available.";

const FALLBACK_REPLY: &str = "I can help with questions about car travel, flights, home energy, \
    or food. Ask me about any of those and I'll suggest ways to shrink your carbon footprint.";

// Keyword sets in priority order; the first set with a substring match wins.
static KEYWORD_REPLIES: [(&[&str], &str); 4] = [
    (&["car", "transport"], CAR_REPLY),
    (&["flight", "travel"], FLIGHT_REPLY),
    (&["electricity", "energy"], ELECTRICITY_REPLY),
    (&["meat", "food"], MEAT_REPLY),
];

/// Canned reply for a user message.
pub fn respond(message: &str) -> &'static str {
    let lowered = message.to_lowercase();
    for (keywords, reply) in KEYWORD_REPLIES.iter() {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return reply;
        }
    }
    FALLBACK_REPLY
}

/// Append the user message and the bot reply to a transcript.
pub fn record_turn(transcript: &mut Vec<ChatTurn>, message: String, reply: &str) {
    transcript.push(ChatTurn {
        role: ChatRole::User,
        content: message,
    });
    transcript.push(ChatTurn {
        role: ChatRole::Bot,
        content: reply.to_string(),
    });
}
