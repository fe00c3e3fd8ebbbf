//! Built-in content: irregular verb tables, question pools, the exercise
//! catalog, and the level table.
//!
//! This is the data the app ships with so it is useful without any external
//! config; TOML config entries can append to the question pools.

use std::collections::HashMap;

use crate::conjugation::ConjugationTables;
use crate::domain::{
    ExerciseConfig, ExerciseId, ExerciseType, Level, PoolName, QuestionBanks, QuestionTemplate,
};

/// Irregular/high-frequency verbs, present subjunctive + present indicative.
/// Rows are ordered yo, tú, él/ella/usted, nosotros, vosotros, ellos/ustedes.
pub fn conjugation_tables() -> ConjugationTables {
    let subjunctive = HashMap::from_iter([
        ("ser", ["sea", "seas", "sea", "seamos", "seáis", "sean"]),
        ("estar", ["esté", "estés", "esté", "estemos", "estéis", "estén"]),
        ("ir", ["vaya", "vayas", "vaya", "vayamos", "vayáis", "vayan"]),
        ("haber", ["haya", "hayas", "haya", "hayamos", "hayáis", "hayan"]),
        ("saber", ["sepa", "sepas", "sepa", "sepamos", "sepáis", "sepan"]),
        ("dar", ["dé", "des", "dé", "demos", "deis", "den"]),
        ("ver", ["vea", "veas", "vea", "veamos", "veáis", "vean"]),
        ("hacer", ["haga", "hagas", "haga", "hagamos", "hagáis", "hagan"]),
        ("tener", ["tenga", "tengas", "tenga", "tengamos", "tengáis", "tengan"]),
        ("poner", ["ponga", "pongas", "ponga", "pongamos", "pongáis", "pongan"]),
        ("venir", ["venga", "vengas", "venga", "vengamos", "vengáis", "vengan"]),
        ("salir", ["salga", "salgas", "salga", "salgamos", "salgáis", "salgan"]),
        ("decir", ["diga", "digas", "diga", "digamos", "digáis", "digan"]),
        ("traer", ["traiga", "traigas", "traiga", "traigamos", "traigáis", "traigan"]),
        ("oír", ["oiga", "oigas", "oiga", "oigamos", "oigáis", "oigan"]),
        ("conocer", ["conozca", "conozcas", "conozca", "conozcamos", "conozcáis", "conozcan"]),
        ("pedir", ["pida", "pidas", "pida", "pidamos", "pidáis", "pidan"]),
        ("dormir", ["duerma", "duermas", "duerma", "durmamos", "durmáis", "duerman"]),
        ("poder", ["pueda", "puedas", "pueda", "podamos", "podáis", "puedan"]),
        ("querer", ["quiera", "quieras", "quiera", "queramos", "queráis", "quieran"]),
        ("jugar", ["juegue", "juegues", "juegue", "juguemos", "juguéis", "jueguen"]),
        ("pensar", ["piense", "pienses", "piense", "pensemos", "penséis", "piensen"]),
        ("volver", ["vuelva", "vuelvas", "vuelva", "volvamos", "volváis", "vuelvan"]),
        ("sentir", ["sienta", "sientas", "sienta", "sintamos", "sintáis", "sientan"]),
        ("acostar", ["acueste", "acuestes", "acueste", "acostemos", "acostéis", "acuesten"]),
        ("buscar", ["busque", "busques", "busque", "busquemos", "busquéis", "busquen"]),
        ("llegar", ["llegue", "llegues", "llegue", "lleguemos", "lleguéis", "lleguen"]),
        ("empezar", ["empiece", "empieces", "empiece", "empecemos", "empecéis", "empiecen"]),
        // Impersonal; only the third person is ever asked for.
        ("llover", ["llueva", "llueva", "llueva", "llueva", "llueva", "llueva"]),
    ]);

    let indicative = HashMap::from_iter([
        ("ser", ["soy", "eres", "es", "somos", "sois", "son"]),
        ("estar", ["estoy", "estás", "está", "estamos", "estáis", "están"]),
        ("ir", ["voy", "vas", "va", "vamos", "vais", "van"]),
        ("haber", ["he", "has", "ha", "hemos", "habéis", "han"]),
        ("saber", ["sé", "sabes", "sabe", "sabemos", "sabéis", "saben"]),
        ("dar", ["doy", "das", "da", "damos", "dais", "dan"]),
        ("ver", ["veo", "ves", "ve", "vemos", "veis", "ven"]),
        ("hacer", ["hago", "haces", "hace", "hacemos", "hacéis", "hacen"]),
        ("tener", ["tengo", "tienes", "tiene", "tenemos", "tenéis", "tienen"]),
        ("poner", ["pongo", "pones", "pone", "ponemos", "ponéis", "ponen"]),
        ("venir", ["vengo", "vienes", "viene", "venimos", "venís", "vienen"]),
        ("salir", ["salgo", "sales", "sale", "salimos", "salís", "salen"]),
        ("decir", ["digo", "dices", "dice", "decimos", "decís", "dicen"]),
        ("traer", ["traigo", "traes", "trae", "traemos", "traéis", "traen"]),
        ("oír", ["oigo", "oyes", "oye", "oímos", "oís", "oyen"]),
        ("conocer", ["conozco", "conoces", "conoce", "conocemos", "conocéis", "conocen"]),
        ("pedir", ["pido", "pides", "pide", "pedimos", "pedís", "piden"]),
        ("dormir", ["duermo", "duermes", "duerme", "dormimos", "dormís", "duermen"]),
        ("poder", ["puedo", "puedes", "puede", "podemos", "podéis", "pueden"]),
        ("querer", ["quiero", "quieres", "quiere", "queremos", "queréis", "quieren"]),
        ("jugar", ["juego", "juegas", "juega", "jugamos", "jugáis", "juegan"]),
        ("pensar", ["pienso", "piensas", "piensa", "pensamos", "pensáis", "piensan"]),
        ("volver", ["vuelvo", "vuelves", "vuelve", "volvemos", "volvéis", "vuelven"]),
        ("sentir", ["siento", "sientes", "siente", "sentimos", "sentís", "sienten"]),
        ("acostar", ["acuesto", "acuestas", "acuesta", "acostamos", "acostáis", "acuestan"]),
        ("llover", ["llueve", "llueve", "llueve", "llueve", "llueve", "llueve"]),
    ]);

    ConjugationTables { subjunctive, indicative }
}

fn forma(verb: &str, answer: &str) -> QuestionTemplate {
    QuestionTemplate::Conjugation {
        verb: verb.to_string(),
        sentence: None,
        answer: answer.to_string(),
    }
}

fn trigger(sentence: &str, verb: &str, answer: &str) -> QuestionTemplate {
    QuestionTemplate::Conjugation {
        verb: verb.to_string(),
        sentence: Some(sentence.to_string()),
        answer: answer.to_string(),
    }
}

fn contrast(sentence: &str, answer: &str, other: &str) -> QuestionTemplate {
    QuestionTemplate::Contrast {
        sentence: sentence.to_string(),
        answer: answer.to_string(),
        other: other.to_string(),
    }
}

fn spot(options: &[&str], answer: &str) -> QuestionTemplate {
    QuestionTemplate::SpotError {
        options: options.iter().map(|s| s.to_string()).collect(),
        answer: answer.to_string(),
    }
}

fn ordering(words: &[&str]) -> QuestionTemplate {
    QuestionTemplate::Ordering {
        words: words.iter().map(|s| s.to_string()).collect(),
    }
}

/// Built-in question pools. The stored answers on conjugation items are
/// placeholders; the generator recomputes them from the verb descriptor.
pub fn question_banks() -> QuestionBanks {
    let forma_pura = vec![
        forma("(yo, hablar)", "hable"),
        forma("(tú, comer)", "comas"),
        forma("(ellos, hacer)", "hagan"),
        forma("(nosotros, vivir)", "vivamos"),
        forma("(usted, ser)", "sea"),
        forma("(ustedes, ir)", "vayan"),
        forma("(yo, tener)", "tenga"),
        forma("(vosotros, estar)", "estéis"),
        forma("(ella, poder)", "pueda"),
        forma("(tú, salir)", "salgas"),
        forma("(yo, levantarse)", "levante"),
        forma("(nosotros, pedir)", "pidamos"),
        forma("(él, saber)", "sepa"),
        forma("(ustedes, dormir)", "duerman"),
    ];

    let disparadores = vec![
        trigger("Espero que __________ (hacer, ellos) una fiesta.", "(ellos, hacer)", "hagan"),
        trigger("Ojalá que __________ (llover) mañana.", "(llover)", "llueva"),
        trigger("Quiero que tú __________ (venir) a mi casa.", "(tú, venir)", "vengas"),
        trigger("Dudo que el tren __________ (salir) a tiempo.", "(el tren, salir)", "salga"),
        trigger(
            "Es importante que nosotros __________ (estudiar) cada día.",
            "(nosotros, estudiar)",
            "estudiemos",
        ),
        trigger("No creo que usted __________ (tener) razón.", "(usted, tener)", "tenga"),
        trigger("Me alegra que vosotros __________ (estar) aquí.", "(vosotros, estar)", "estéis"),
        trigger("Es posible que yo __________ (ir) al cine.", "(yo, ir)", "vaya"),
        trigger("Prefiero que ustedes __________ (decir) la verdad.", "(ustedes, decir)", "digan"),
        trigger("Temo que ella no __________ (poder) venir.", "(ella, poder)", "pueda"),
        trigger("Sugiero que tú __________ (acostarse) temprano.", "(tú, acostarse)", "acuestes"),
        trigger(
            "Es necesario que los estudiantes __________ (escribir, ellos) el ensayo.",
            "(ellos, escribir)",
            "escriban",
        ),
    ];

    let contraste = vec![
        contrast("Creo que Juan __________ con nosotros.", "viene", "venga"),
        contrast("No creo que Juan __________ con nosotros.", "venga", "viene"),
        contrast("Es verdad que ella __________ mucho.", "estudia", "estudie"),
        contrast("Dudo que ellos __________ la respuesta.", "sepan", "saben"),
        contrast("Sé que tú __________ cocinar.", "sabes", "sepas"),
        contrast("Espero que el examen __________ fácil.", "sea", "es"),
        contrast("Es obvio que vosotros __________ cansados.", "estáis", "estéis"),
        contrast("Quiero que me __________ la verdad.", "digas", "dices"),
    ];

    let ordenar_frase = vec![
        ordering(&["Ojalá", "que", "tengas", "un", "buen", "día"]),
        ordering(&["Espero", "que", "vengas", "a", "la", "fiesta"]),
        ordering(&["Dudo", "que", "ellos", "lleguen", "a", "tiempo"]),
        ordering(&["Es", "importante", "que", "estudies", "mucho"]),
        ordering(&["Quiero", "que", "seas", "feliz"]),
        ordering(&["No", "creo", "que", "llueva", "hoy"]),
        ordering(&["Me", "alegra", "que", "estés", "aquí"]),
        ordering(&["Es", "posible", "que", "vayamos", "al", "cine"]),
    ];

    let identificar_error = vec![
        spot(
            &[
                "Espero que vienes mañana.",
                "Espero que vengas mañana.",
                "Espero que venir mañana.",
            ],
            "Espero que vengas mañana.",
        ),
        spot(
            &[
                "Quiero que comas bien.",
                "Quiero que comes bien.",
                "Quiero que comer bien.",
            ],
            "Quiero que comas bien.",
        ),
        spot(
            &[
                "Dudo que es verdad.",
                "Dudo que sea verdad.",
                "Dudo que ser verdad.",
            ],
            "Dudo que sea verdad.",
        ),
        spot(
            &[
                "Es importante que haces la tarea.",
                "Es importante que hagas la tarea.",
                "Es importante que hacer la tarea.",
            ],
            "Es importante que hagas la tarea.",
        ),
        spot(
            &[
                "Ojalá que tengamos suerte.",
                "Ojalá que tenemos suerte.",
                "Ojalá que tener suerte.",
            ],
            "Ojalá que tengamos suerte.",
        ),
        spot(
            &[
                "No creo que pueden venir.",
                "No creo que puedan venir.",
                "No creo que poder venir.",
            ],
            "No creo que puedan venir.",
        ),
    ];

    QuestionBanks::new(HashMap::from_iter([
        (PoolName::FormaPura, forma_pura),
        (PoolName::Disparadores, disparadores),
        (PoolName::Contraste, contraste),
        (PoolName::OrdenarFrase, ordenar_frase),
        (PoolName::IdentificarError, identificar_error),
    ]))
}

/// The seven drill tabs.
pub static EXERCISE_CATALOG: [ExerciseConfig; 7] = [
    ExerciseConfig {
        id: ExerciseId::Ejercicio1,
        title: "1. La Forma (Nivel 1): Elegir",
        description: "Elige la conjugación pura del presente de subjuntivo (incluye irregulares clave).",
        exercise_type: ExerciseType::Radio,
        pool: PoolName::FormaPura,
    },
    ExerciseConfig {
        id: ExerciseId::Ejercicio2,
        title: "2. La Forma (Nivel 2): Escribir",
        description: "Escribe la conjugación pura del presente de subjuntivo. ¡Cuidado con la ortografía!",
        exercise_type: ExerciseType::Input,
        pool: PoolName::FormaPura,
    },
    ExerciseConfig {
        id: ExerciseId::Ejercicio3,
        title: "3. El Contraste: Indicativo vs. Subjuntivo",
        description: "Elige la opción correcta. ¿Se usa Indicativo (certeza) o Subjuntivo (duda, deseo, irrealidad)?",
        exercise_type: ExerciseType::Radio,
        pool: PoolName::Contraste,
    },
    ExerciseConfig {
        id: ExerciseId::Ejercicio4,
        title: "4. Disparadores (Nivel 1): Elegir",
        description: "Identifica la forma correcta (subjuntivo) después de verbos de influencia, deseo o duda.",
        exercise_type: ExerciseType::Radio,
        pool: PoolName::Disparadores,
    },
    ExerciseConfig {
        id: ExerciseId::Ejercicio5,
        title: "5. Disparadores (Nivel 2): Escribir",
        description: "Completa la frase con el presente de subjuntivo del verbo entre paréntesis.",
        exercise_type: ExerciseType::Input,
        pool: PoolName::Disparadores,
    },
    ExerciseConfig {
        id: ExerciseId::Ejercicio6,
        title: "6. Ordenar la Frase",
        description: "Construye una frase gramaticalmente correcta usando las palabras provistas.",
        exercise_type: ExerciseType::Ordering,
        pool: PoolName::OrdenarFrase,
    },
    ExerciseConfig {
        id: ExerciseId::Ejercicio7,
        title: "7. Identificar el Error",
        description: "Elige la frase que está escrita correctamente. ¡Presta atención al modo verbal!",
        exercise_type: ExerciseType::Radio,
        pool: PoolName::IdentificarError,
    },
];

pub fn exercise_config(id: ExerciseId) -> &'static ExerciseConfig {
    // Catalog order matches the ExerciseId variant order.
    &EXERCISE_CATALOG[id as usize]
}

/// Progression table: total correct answers unlock levels and tabs.
pub static LEVELS: [Level; 5] = [
    Level {
        level_number: 1,
        title: "Nivel 1: Fundamentos",
        unlock_threshold: 0,
        available_exercises: &[ExerciseId::Ejercicio1, ExerciseId::Ejercicio2],
    },
    Level {
        level_number: 2,
        title: "Nivel 2: Contraste",
        unlock_threshold: 10,
        available_exercises: &[
            ExerciseId::Ejercicio1,
            ExerciseId::Ejercicio2,
            ExerciseId::Ejercicio3,
        ],
    },
    Level {
        level_number: 3,
        title: "Nivel 3: Disparadores",
        unlock_threshold: 25,
        available_exercises: &[
            ExerciseId::Ejercicio1,
            ExerciseId::Ejercicio2,
            ExerciseId::Ejercicio3,
            ExerciseId::Ejercicio4,
            ExerciseId::Ejercicio5,
        ],
    },
    Level {
        level_number: 4,
        title: "Nivel 4: Aplicación",
        unlock_threshold: 50,
        available_exercises: &[
            ExerciseId::Ejercicio1,
            ExerciseId::Ejercicio2,
            ExerciseId::Ejercicio3,
            ExerciseId::Ejercicio4,
            ExerciseId::Ejercicio5,
            ExerciseId::Ejercicio6,
        ],
    },
    Level {
        level_number: 5,
        title: "Nivel 5: Maestría",
        unlock_threshold: 80,
        available_exercises: &[
            ExerciseId::Ejercicio1,
            ExerciseId::Ejercicio2,
            ExerciseId::Ejercicio3,
            ExerciseId::Ejercicio4,
            ExerciseId::Ejercicio5,
            ExerciseId::Ejercicio6,
            ExerciseId::Ejercicio7,
        ],
    },
];
