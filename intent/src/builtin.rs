//! Built-in vocabulary: English, Hindi (Devanagari), romanized Hindi and
//! Spanish.
//!
//! Entries are written naturally and normalized when the catalog is built.

use aegis_distress::EmergencyType;

pub(crate) struct PatternDef {
    pub core: &'static [&'static str],
    pub context: &'static [&'static str],
    pub negation: &'static [&'static str],
    pub weight: f32,
}

const fn p(
    core: &'static [&'static str],
    context: &'static [&'static str],
    negation: &'static [&'static str],
    weight: f32,
) -> PatternDef {
    PatternDef {
        core,
        context,
        negation,
        weight,
    }
}

pub(crate) const THREAT_VERBS: &[&str] = &[
    // English
    "kill", "killing", "hurt", "hurting", "attack", "attacking", "hit", "hitting", "beat",
    "beating", "stab", "stabbing", "shoot", "shooting", "rape", "kidnap", "choke", "choking",
    "strangle", "rob",
    // Hindi
    "मार", "मारो", "मारूंगा", "मार डालूंगा", "जान से मार", "चाकू", "गोली",
    // Romanized Hindi
    "maar", "maro", "maaro", "maarunga", "maar dunga", "maar dalunga", "chaku", "goli",
    // Spanish
    "matar", "mato", "golpear", "pegar", "violar", "secuestrar", "apuñalar", "disparar",
];

pub(crate) const DISTRESS_PHRASES: &[&str] = &[
    // English
    "help me", "please help", "somebody help", "someone help", "save me", "please don't",
    "don't hurt me", "let me go", "leave me alone", "get away from me", "stop it", "scared",
    "afraid", "terrified", "call the police", "i need help",
    // Hindi
    "बचाओ", "मदद करो", "मुझे छोड़ो", "छोड़ दो", "डर लग", "पुलिस बुलाओ",
    // Romanized Hindi
    "bachao", "madad karo", "mujhe chhodo", "chhod do", "chhodo mujhe", "dar lag", "police bulao",
    // Spanish
    "ayuda", "ayúdame", "socorro", "auxilio", "déjame", "suéltame", "tengo miedo",
    "no me hagas daño", "por favor no", "llamen a la policía",
];

/// Merged into every pattern's negations: talk about fiction and play is
/// not an emergency.
pub(crate) const COMMON_NEGATIONS: &[&str] = &[
    // English
    "movie", "movies", "film", "films", "game", "games", "joke", "joking", "kidding", "news",
    "story", "stories", "tv", "show", "shows", "song", "songs", "dream", "dreamed", "episode",
    "series", "novel", "pretend", "drill",
    // Hindi
    "फिल्म", "मज़ाक", "मजाक", "सपना", "खबर",
    // Romanized Hindi
    "filmy", "mazak", "mazaak", "sapna", "khabar",
    // Spanish
    "película", "pelicula", "juego", "broma", "noticias", "sueño", "serie",
];

const ASSAULT: &[PatternDef] = &[
    p(&["attack"], &["me", "help", "someone", "being", "he", "im"], &["heart", "panic", "asthma"], 1.0),
    p(&["attacked"], &["me", "help", "someone", "being", "im", "was"], &["heart"], 1.0),
    p(&["attacking"], &["me", "someone", "is", "he", "help"], &["heart"], 1.0),
    p(&["hurt"], &["me", "don't", "please", "someone", "stop", "going"], &["feelings"], 0.9),
    p(&["beating"], &["me", "someone", "stop", "is", "he"], &["egg", "heart"], 0.9),
    p(&["hit"], &["me", "stop", "someone", "don't", "he", "keeps"], &["big hit", "hit song"], 0.7),
    p(&["stab"], &["me", "knife", "going", "he"], &[], 1.0),
    p(&["stabbed"], &["me", "knife", "been", "someone"], &[], 1.0),
    p(&["rape"], &["help", "me", "trying"], &[], 1.0),
    p(&["gun"], &["has", "pointing", "he", "man", "at", "me"], &["water gun", "nail gun"], 0.9),
    p(&["knife"], &["has", "pulled", "man", "he", "me"], &["butter knife"], 0.8),
    p(&["मार"], &["रहा", "रहे", "मुझे", "बचाओ", "डालेगा"], &[], 1.0),
    p(&["मारो", "मत"], &["मुझे", "प्लीज़"], &[], 1.0),
    p(&["maar"], &["raha", "rahe", "mujhe", "bachao", "dalega"], &[], 1.0),
    p(&["maro", "mat"], &["mujhe", "please"], &[], 1.0),
    p(&["ataque"], &["me", "ayuda", "alguien"], &["corazón", "corazon", "pánico"], 0.9),
    p(&["golpeando"], &["me", "alguien", "está"], &[], 1.0),
    p(&["pegando"], &["me", "alguien", "está"], &[], 0.9),
    p(&["violar"], &["quiere", "intentó", "ayuda"], &[], 1.0),
];

const HARASSMENT: &[PatternDef] = &[
    p(&["touching"], &["me", "stop", "don't", "inappropriately", "keeps"], &[], 0.9),
    p(&["following"], &["me", "someone", "man", "is", "he", "keeps"], &["instagram", "twitter"], 0.8),
    p(&["stalking"], &["me", "someone", "he"], &[], 1.0),
    p(&["harassing"], &["me", "he", "someone", "keeps"], &[], 1.0),
    p(&["harassment"], &["sexual", "help"], &[], 0.9),
    p(&["groping"], &["me", "he", "someone"], &[], 1.0),
    p(&["leave me alone"], &["stop", "please", "go"], &[], 0.8),
    p(&["छेड़"], &["रहा", "रहे", "मुझे"], &[], 0.9),
    p(&["पीछा"], &["कर", "रहा", "मेरा"], &[], 0.9),
    p(&["chhed"], &["raha", "rahe", "mujhe"], &[], 0.9),
    p(&["peecha"], &["kar", "raha", "mera"], &[], 0.9),
    p(&["pichha"], &["kar", "raha", "mera"], &[], 0.9),
    p(&["acosando"], &["me", "está", "alguien"], &[], 1.0),
    p(&["siguiendo"], &["me", "alguien", "hombre", "está"], &[], 0.8),
    p(&["tocando"], &["me", "no", "está"], &[], 0.8),
];

const KIDNAPPING: &[PatternDef] = &[
    p(&["kidnap"], &["help", "me", "trying", "going"], &[], 1.0),
    p(&["kidnapped"], &["help", "me", "been", "im", "being"], &[], 1.0),
    p(&["kidnapping"], &["help", "me", "being", "im"], &[], 1.0),
    p(&["abducted"], &["help", "me", "been", "being"], &[], 1.0),
    p(&["taking me"], &["car", "van", "help", "where", "away"], &[], 0.8),
    p(&["pushed", "into"], &["car", "van", "me"], &[], 0.9),
    p(&["let me go"], &["please", "car", "where"], &[], 0.7),
    p(&["अपहरण"], &["हो", "मेरा", "बचाओ"], &[], 1.0),
    p(&["उठा"], &["ले", "जा", "रहे", "मुझे"], &[], 0.8),
    p(&["agwa"], &["ho", "mera", "bachao"], &[], 1.0),
    p(&["utha"], &["le", "ja", "rahe", "mujhe"], &[], 0.8),
    p(&["secuestro"], &["ayuda", "es", "un"], &[], 1.0),
    p(&["secuestrado"], &["me", "han", "ayuda"], &[], 1.0),
    p(&["secuestrada"], &["me", "han", "ayuda"], &[], 1.0),
    p(&["llevando"], &["me", "carro", "coche", "ayuda"], &[], 0.7),
];

const ROBBERY: &[PatternDef] = &[
    p(&["robbed"], &["me", "been", "just", "im", "being"], &[], 1.0),
    p(&["robbing"], &["me", "someone", "being", "store"], &[], 1.0),
    p(&["robbery"], &["help", "this", "is", "a"], &[], 1.0),
    p(&["mugged"], &["me", "been", "just", "being"], &[], 1.0),
    p(&["snatched"], &["phone", "bag", "chain", "purse", "my"], &[], 0.8),
    p(&["wallet"], &["give", "your", "took", "stole", "my"], &[], 0.6),
    p(&["thief"], &["help", "stop", "catch", "chor"], &[], 0.8),
    p(&["चोर"], &["पकड़ो", "बचाओ", "है"], &[], 0.9),
    p(&["लूट"], &["लिया", "रहा", "लो"], &[], 1.0),
    p(&["chor"], &["pakdo", "bachao", "hai"], &[], 0.9),
    p(&["loot"], &["liya", "raha", "lo", "gaya"], &["loot box"], 0.9),
    p(&["robo"], &["un", "ayuda", "es"], &[], 1.0),
    p(&["robando"], &["me", "están", "alguien"], &[], 1.0),
    p(&["asalto"], &["un", "ayuda", "es"], &[], 1.0),
    p(&["ladrón"], &["ayuda", "un", "hay"], &[], 0.9),
];

const MEDICAL_EMERGENCY: &[PatternDef] = &[
    p(&["heart attack"], &["having", "he", "she", "help", "think"], &[], 1.0),
    p(&["can't breathe"], &["i", "help", "he", "she"], &[], 1.0),
    p(&["not breathing"], &["he", "she", "is", "help"], &[], 1.0),
    p(&["unconscious"], &["he", "she", "is", "help"], &[], 1.0),
    p(&["collapsed"], &["he", "she", "just", "help"], &[], 0.9),
    p(&["seizure"], &["having", "he", "she", "help"], &[], 1.0),
    p(&["overdose"], &["he", "she", "help", "took"], &[], 1.0),
    p(&["bleeding"], &["badly", "lot", "help", "stop", "wont"], &["nose"], 0.8),
    p(&["ambulance"], &["call", "need", "an", "get"], &[], 1.0),
    p(&["chest pain"], &["having", "severe", "help"], &[], 0.9),
    p(&["दिल का दौरा"], &["पड़ा", "आया"], &[], 1.0),
    p(&["सांस नहीं"], &["आ", "रही", "ले"], &[], 1.0),
    p(&["बेहोश"], &["हो", "गया", "गई"], &[], 1.0),
    p(&["एम्बुलेंस"], &["बुलाओ", "चाहिए"], &[], 1.0),
    p(&["dil ka daura"], &["pada", "aaya"], &[], 1.0),
    p(&["saans nahi"], &["aa", "rahi", "le"], &[], 1.0),
    p(&["behosh"], &["ho", "gaya", "gayi"], &[], 1.0),
    p(&["ambulance bulao"], &["jaldi"], &[], 1.0),
    p(&["ataque al corazón"], &["tiene", "un", "ayuda"], &[], 1.0),
    p(&["no puedo respirar"], &["ayuda"], &[], 1.0),
    p(&["inconsciente"], &["está", "ayuda"], &[], 1.0),
    p(&["ambulancia"], &["llamen", "llama", "una", "necesito"], &[], 1.0),
];

const FIRE: &[PatternDef] = &[
    p(&["fire"], &["help", "building", "burning", "house", "smoke", "call", "there", "is"], &["fired", "ceasefire", "fireworks", "campfire", "open fire"], 0.9),
    p(&["burning"], &["house", "building", "car", "smoke", "help"], &["heartburn", "calories", "sun"], 0.8),
    p(&["smoke"], &["lot", "room", "building", "everywhere", "full"], &["cigarette", "smoke weed"], 0.7),
    p(&["flames"], &["help", "building", "house", "in"], &[], 0.9),
    p(&["आग"], &["लगी", "लग", "बचाओ", "गई"], &[], 1.0),
    p(&["aag"], &["lagi", "lag", "gayi", "bachao"], &[], 1.0),
    p(&["incendio"], &["hay", "un", "ayuda"], &[], 1.0),
    p(&["fuego"], &["hay", "ayuda", "casa"], &[], 0.9),
];

const ROAD_ACCIDENT: &[PatternDef] = &[
    p(&["accident"], &["car", "road", "bike", "crash", "hit", "ambulance", "bad"], &["by accident", "accidentally", "happy accident"], 0.9),
    p(&["crashed"], &["car", "truck", "bike", "we", "into", "bus"], &["computer", "app", "server", "party"], 0.9),
    p(&["hit by"], &["car", "truck", "bus", "bike"], &[], 0.9),
    p(&["run over"], &["car", "got", "was"], &[], 0.9),
    p(&["दुर्घटना"], &["हो", "गई", "सड़क"], &[], 1.0),
    p(&["एक्सीडेंट"], &["हो", "गया"], &[], 1.0),
    p(&["टक्कर"], &["हो", "गई", "मार"], &[], 0.9),
    p(&["takkar"], &["ho", "gayi", "maar", "di"], &[], 0.9),
    p(&["accidente"], &["carro", "coche", "choque", "ambulancia", "hubo"], &["por accidente"], 0.9),
    p(&["choque"], &["carro", "coche", "hubo", "un"], &[], 0.9),
    p(&["atropellado"], &["fue", "ha", "sido"], &[], 1.0),
];

const CROWD_PANIC: &[PatternDef] = &[
    p(&["stampede"], &["help", "there", "is", "crowd"], &[], 1.0),
    p(&["crowd"], &["pushing", "crushing", "panic", "run", "trapped"], &["crowdfunding"], 0.8),
    p(&["everyone running"], &["run", "panic", "help"], &[], 0.8),
    p(&["crushed"], &["crowd", "people", "being", "cant", "breathe"], &[], 0.8),
    p(&["भगदड़"], &["मच", "गई"], &[], 1.0),
    p(&["भीड़"], &["धक्का", "भागो", "दब"], &[], 0.8),
    p(&["bhagdad"], &["mach", "gayi"], &[], 1.0),
    p(&["bheed"], &["dhakka", "bhago", "dab"], &[], 0.8),
    p(&["estampida"], &["hay", "una", "ayuda"], &[], 1.0),
    p(&["multitud"], &["empujando", "pánico", "corran", "aplastando"], &[], 0.8),
];

const EXPLOSION: &[PatternDef] = &[
    p(&["explosion"], &["heard", "there", "was", "loud", "big"], &[], 1.0),
    p(&["exploded"], &["something", "just", "it", "bomb"], &[], 1.0),
    p(&["blast"], &["bomb", "loud", "heard", "building"], &["had a blast", "blast from the past"], 0.9),
    p(&["bomb"], &["there", "is", "has", "planted", "went", "off"], &["photobomb", "bombed"], 0.9),
    p(&["gas leak"], &["there", "is", "smell"], &[], 0.9),
    p(&["धमाका"], &["हुआ", "जोरदार", "बड़ा"], &[], 1.0),
    p(&["विस्फोट"], &["हुआ", "बम"], &[], 1.0),
    p(&["बम"], &["है", "फटा", "रखा"], &[], 0.9),
    p(&["dhamaka"], &["hua", "zordar", "bada"], &[], 1.0),
    p(&["phata"], &["cylinder", "bomb"], &[], 0.8),
    p(&["explosión"], &["hubo", "una", "escuché"], &[], 1.0),
    p(&["explotó"], &["algo", "bomba"], &[], 1.0),
    p(&["bomba"], &["hay", "una", "explotó"], &[], 0.9),
];

const GENERAL_DISTRESS: &[PatternDef] = &[
    p(&["help"], &["me", "please", "somebody", "someone", "now"], &["help you", "help with", "helpful", "help desk"], 0.7),
    p(&["emergency"], &["this", "is", "an", "help", "call"], &["emergency exit"], 0.8),
    p(&["call the police"], &["please", "someone", "now"], &[], 1.0),
    p(&["police"], &["call", "get", "help", "someone"], &[], 0.7),
    p(&["बचाओ"], &["कोई", "मुझे", "प्लीज़"], &[], 1.0),
    p(&["मदद"], &["करो", "कोई", "चाहिए"], &[], 0.9),
    p(&["पुलिस"], &["बुलाओ", "कोई"], &[], 0.9),
    p(&["bachao"], &["koi", "mujhe", "please"], &[], 1.0),
    p(&["madad"], &["karo", "koi", "chahiye"], &[], 0.9),
    p(&["police bulao"], &["koi", "jaldi"], &[], 1.0),
    p(&["ayuda"], &["por", "favor", "alguien", "necesito"], &[], 0.9),
    p(&["auxilio"], &["por", "favor", "alguien"], &[], 1.0),
    p(&["socorro"], &["por", "favor", "alguien"], &[], 1.0),
    p(&["llamen a la policía"], &["por", "favor"], &[], 1.0),
];

pub(crate) const TYPES: &[(EmergencyType, &[PatternDef])] = &[
    (EmergencyType::Assault, ASSAULT),
    (EmergencyType::Harassment, HARASSMENT),
    (EmergencyType::Kidnapping, KIDNAPPING),
    (EmergencyType::Robbery, ROBBERY),
    (EmergencyType::MedicalEmergency, MEDICAL_EMERGENCY),
    (EmergencyType::Fire, FIRE),
    (EmergencyType::RoadAccident, ROAD_ACCIDENT),
    (EmergencyType::CrowdPanic, CROWD_PANIC),
    (EmergencyType::Explosion, EXPLOSION),
    (EmergencyType::GeneralDistress, GENERAL_DISTRESS),
];
