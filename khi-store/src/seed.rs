use chrono::{DateTime, Utc};
use khi_core::{Deal, DealResult};
use serde_json::json;

/// The launch catalogue of deals out of Karachi.
pub fn demo_deals(now: DateTime<Utc>) -> DealResult<Vec<Deal>> {
    let rows = [
        json!({
            "destination": "DXB",
            "destination_city": "Dubai",
            "departure_date": "2026-03-15",
            "return_date": "2026-03-22",
            "price": 14500,
            "original_price": 29000,
            "airline": "Emirates",
            "airline_logo": "https://images.kiwi.com/airlines/64/EK.png",
            "stops": 0,
            "category": "common",
            "available_months": ["March", "April", "May"],
            "google_flights_url": "https://www.google.com/travel/flights?q=flights from KHI to DXB"
        }),
        json!({
            "destination": "LHR",
            "destination_city": "London",
            "departure_date": "2026-04-10",
            "return_date": "2026-04-20",
            "price": 64000,
            "original_price": 150000,
            "airline": "British Airways",
            "airline_logo": "https://images.kiwi.com/airlines/64/BA.png",
            "stops": 1,
            "category": "rare",
            "available_months": ["April", "May", "June"],
            "google_flights_url": "https://www.google.com/travel/flights?q=flights from KHI to LHR"
        }),
        json!({
            "destination": "BKK",
            "destination_city": "Bangkok",
            "departure_date": "2026-03-25",
            "return_date": "2026-04-05",
            "price": 27500,
            "original_price": 55000,
            "airline": "Thai Airways",
            "airline_logo": "https://images.kiwi.com/airlines/64/TG.png",
            "stops": 0,
            "category": "common",
            "available_months": ["March", "April"],
            "google_flights_url": "https://www.google.com/travel/flights?q=flights from KHI to BKK"
        }),
        json!({
            "destination": "IST",
            "destination_city": "Istanbul",
            "departure_date": "2026-05-01",
            "return_date": "2026-05-10",
            "price": 42000,
            "original_price": 90000,
            "airline": "Turkish Airlines",
            "airline_logo": "https://images.kiwi.com/airlines/64/TK.png",
            "stops": 0,
            "category": "rare",
            "available_months": ["May", "June"],
            "google_flights_url": "https://www.google.com/travel/flights?q=flights from KHI to IST"
        }),
        json!({
            "destination": "JED",
            "destination_city": "Jeddah",
            "departure_date": "2026-03-20",
            "return_date": "2026-03-30",
            "price": 24000,
            "original_price": 48000,
            "airline": "Saudia",
            "airline_logo": "https://images.kiwi.com/airlines/64/SV.png",
            "stops": 0,
            "category": "common",
            "available_months": ["March", "April", "May"],
            "google_flights_url": "https://www.google.com/travel/flights?q=flights from KHI to JED"
        }),
    ];

    rows.into_iter()
        .zip(1u64..)
        .map(|(row, id)| Deal::from_submission(id, row, now))
        .collect()
}
