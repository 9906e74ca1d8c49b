use aegis_distress::EmergencyType;

use crate::*;

fn classify(text: &str) -> aegis_distress::EmergencyClassification {
    SemanticIntentClassifier::new().classify_intent(text)
}

#[test]
fn pleading_victim() {
    let analysis = SemanticIntentClassifier::new().analyze("I'm scared, please don't hurt me");
    assert_eq!(analysis.normalized, "im scared please dont hurt me");
    assert!(analysis.threat_verb);
    assert_eq!(analysis.distress_score, 1.0);
    assert_eq!(analysis.classification.emergency_type, EmergencyType::Assault);
    assert!(analysis.classification.confidence > 0.5);
}

#[test]
fn fiction_is_not_an_emergency() {
    for text in [
        "saw an attack in a movie",
        "he got kidnapped in the game",
        "just kidding, there is no fire",
        "मैंने फिल्म में आग देखी",
        "es una broma, no hay incendio",
    ] {
        assert!(!classify(text).is_emergency(), "{text}");
    }
}

#[test]
fn hindi_devanagari() {
    let c = classify("बचाओ! कोई मुझे मार रहा है");
    assert_eq!(c.emergency_type, EmergencyType::Assault);
    assert!(c.is_emergency());

    let c = classify("आग लगी है, बचाओ");
    assert_eq!(c.emergency_type, EmergencyType::Fire);
}

#[test]
fn romanized_hindi() {
    let c = classify("koi bachao, mujhe maar rahe hain");
    assert_eq!(c.emergency_type, EmergencyType::Assault);
    assert!(c.is_emergency());

    let c = classify("wo behosh ho gaya, ambulance bulao");
    assert_eq!(c.emergency_type, EmergencyType::MedicalEmergency);
}

#[test]
fn spanish() {
    let c = classify("¡Socorro! Hay un incendio");
    assert_eq!(c.emergency_type, EmergencyType::Fire);
    assert!(c.is_emergency());

    let c = classify("no puedo respirar, ayuda");
    assert_eq!(c.emergency_type, EmergencyType::MedicalEmergency);
}

#[test]
fn each_type_has_a_plain_english_report() {
    let cases = [
        ("someone is attacking me, help", EmergencyType::Assault),
        ("a man keeps following me", EmergencyType::Harassment),
        ("help I have been kidnapped", EmergencyType::Kidnapping),
        ("I just got robbed", EmergencyType::Robbery),
        ("she is unconscious, call an ambulance", EmergencyType::MedicalEmergency),
        ("there is a fire in the building", EmergencyType::Fire),
        ("bad car accident on the road", EmergencyType::RoadAccident),
        ("there is a stampede", EmergencyType::CrowdPanic),
        ("I heard a loud explosion", EmergencyType::Explosion),
        ("somebody call the police", EmergencyType::GeneralDistress),
    ];
    let classifier = SemanticIntentClassifier::new();
    for (text, expected) in cases {
        let c = classifier.classify_intent(text);
        assert_eq!(c.emergency_type, expected, "{text}: {c}");
        assert!(c.is_emergency(), "{text}: {c}");
    }
}

#[test]
fn analysis_serializes() {
    let analysis = SemanticIntentClassifier::new().analyze("fire, help!");
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["normalized"], "fire help");
    assert_eq!(json["classification"]["type"], "FIRE");
    assert_eq!(json["scores"][0]["type"], "FIRE");
}
