//! Generate a sample report for manual inspection

fn main() {
    let json = r#"[
        { "id": "2f6c1d0a-1b7e-4c55-9b0a-3a1e0c9d7f01", "started_at": "2024-03-02T07:10:00Z", "ended_at": "2024-03-02T10:00:00Z", "severity": 5, "onset_speed": "gradual",
          "weather": { "temperature_c": 6.0, "humidity_pct": 82.0, "pressure_hpa": 1004.0, "pressure_trend": "falling", "uv_index": 1.0, "condition": "rain" },
          "retrospective": { "foods": ["red wine"], "sleep_hours": 5.5, "stress_level": 4, "medication": { "name": "Sumatriptan", "effectiveness": 4, "is_acute": true } } },
        { "id": "2f6c1d0a-1b7e-4c55-9b0a-3a1e0c9d7f02", "started_at": "2024-03-06T13:40:00Z", "ended_at": "2024-03-06T15:10:00Z", "severity": 1, "onset_speed": "gradual",
          "weather": { "temperature_c": 19.0, "humidity_pct": 45.0, "pressure_hpa": 1021.0, "pressure_trend": "stable", "uv_index": 5.0, "condition": "clear" },
          "retrospective": { "foods": ["Coffee"], "sleep_hours": 8.0, "medication": { "name": "Ibuprofen", "effectiveness": 3 } } },
        { "id": "2f6c1d0a-1b7e-4c55-9b0a-3a1e0c9d7f03", "started_at": "2024-03-09T18:20:00Z", "ended_at": "2024-03-09T23:00:00Z", "severity": 5, "onset_speed": "moderate",
          "weather": { "temperature_c": 4.0, "humidity_pct": 88.0, "pressure_hpa": 1001.0, "pressure_trend": "falling", "uv_index": 0.0, "condition": "thunderstorm" },
          "retrospective": { "foods": ["Red Wine", "cheese"], "skipped_meal": true, "sleep_hours": 6.0, "symptoms": ["nausea", "light_sensitivity"], "medication": { "name": "Sumatriptan", "effectiveness": 5, "is_acute": true } } },
        { "id": "2f6c1d0a-1b7e-4c55-9b0a-3a1e0c9d7f04", "started_at": "2024-03-12T08:00:00Z", "ended_at": "2024-03-12T09:30:00Z", "severity": 1, "onset_speed": "gradual",
          "weather": { "temperature_c": 21.0, "humidity_pct": 40.0, "pressure_hpa": 1019.0, "pressure_trend": "rising", "uv_index": 6.0, "condition": "clear" },
          "health": { "sleep_hours": 7.5 },
          "retrospective": { "foods": ["coffee"], "medication": { "name": "Ibuprofen", "effectiveness": 2 } } },
        { "id": "2f6c1d0a-1b7e-4c55-9b0a-3a1e0c9d7f05", "started_at": "2024-03-15T22:45:00Z", "severity": 3, "onset_speed": "instantaneous",
          "retrospective": { "symptoms": ["aura", "visual_disturbance"] } }
    ]"#;

    match headache_insights::episodes_to_export_json(json, "2024-03-20T12:00:00+01:00") {
        Ok(document) => print!("{document}"),
        Err(e) => eprintln!("Error: {e:?}"),
    }
}
