//! Per-language word lists for the built-in analyzer.
//!
//! Each [`Lexicon`] holds the closed word classes (determiners, pronouns,
//! auxiliaries, adpositions, conjunctions), small open-class lists, a table
//! of conjugated verb forms mapped to their lemma, and the stopword set.
//! Lexicons are built once on first use and shared read-only.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::dictionaries::irregular_verbs::{IRREGULAR_BASES, IRREGULAR_FORMS};
use crate::language::Language;

/// Word lists for one language.
#[derive(Debug)]
pub struct Lexicon {
    /// Coordinating conjunctions ("and", "y", "et", "und").
    pub coordinating_conjunctions: HashSet<&'static str>,
    /// Subordinating conjunctions.
    pub subordinating_conjunctions: HashSet<&'static str>,
    /// Articles, demonstratives, possessives, quantifiers.
    pub determiners: HashSet<&'static str>,
    /// Pronouns that can head a clause as its subject.
    pub subject_pronouns: HashSet<&'static str>,
    /// Object, reflexive and indefinite pronouns.
    pub other_pronouns: HashSet<&'static str>,
    /// Auxiliary and copular verb forms.
    pub auxiliaries: HashSet<&'static str>,
    /// Copular forms (and subject contractions that contain one).
    pub copulas: HashSet<&'static str>,
    /// Prepositions and contracted prepositions.
    pub adpositions: HashSet<&'static str>,
    /// Common adverbs, including negation.
    pub adverbs: HashSet<&'static str>,
    /// Common adjectives.
    pub adjectives: HashSet<&'static str>,
    /// Greetings and other interjections.
    pub interjections: HashSet<&'static str>,
    /// Nouns that would otherwise match a verb suffix rule.
    pub suffix_exceptions: HashSet<&'static str>,
    /// Conjugated verb form to lemma.
    pub verb_forms: HashMap<&'static str, &'static str>,
    /// Words flagged as stopwords.
    pub stopwords: HashSet<&'static str>,
}

impl Lexicon {
    /// Returns the lexicon for `language`.
    pub fn for_language(language: Language) -> &'static Self {
        match language {
            Language::En => &ENGLISH,
            Language::Es => &SPANISH,
            Language::Fr => &FRENCH,
            Language::De => &GERMAN,
        }
    }

    /// Whether `word` (lowercase) is a stopword in this language.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Lemma of a known verb form, if any.
    pub fn verb_lemma(&self, word: &str) -> Option<&'static str> {
        self.verb_forms.get(word).copied()
    }
}

/// Word lists shared by every lexicon constructor, before stopwords are derived.
struct WordClasses {
    cconj: &'static [&'static str],
    sconj: &'static [&'static str],
    det: &'static [&'static str],
    subj: &'static [&'static str],
    pron: &'static [&'static str],
    aux: &'static [&'static str],
    copulas: &'static [&'static str],
    adp: &'static [&'static str],
    adv: &'static [&'static str],
    adj: &'static [&'static str],
    intj: &'static [&'static str],
    exceptions: &'static [&'static str],
    /// Stopwords beyond the closed classes.
    extra_stop: &'static [&'static str],
}

fn build(classes: &WordClasses, verb_forms: HashMap<&'static str, &'static str>) -> Lexicon {
    let set = |words: &[&'static str]| words.iter().copied().collect::<HashSet<_>>();

    let stopwords = [
        classes.cconj,
        classes.sconj,
        classes.det,
        classes.subj,
        classes.pron,
        classes.aux,
        classes.adp,
        classes.extra_stop,
    ]
    .concat()
    .into_iter()
    .collect();

    Lexicon {
        coordinating_conjunctions: set(classes.cconj),
        subordinating_conjunctions: set(classes.sconj),
        determiners: set(classes.det),
        subject_pronouns: set(classes.subj),
        other_pronouns: set(classes.pron),
        auxiliaries: set(classes.aux),
        copulas: set(classes.copulas),
        adpositions: set(classes.adp),
        adverbs: set(classes.adv),
        adjectives: set(classes.adj),
        interjections: set(classes.intj),
        suffix_exceptions: set(classes.exceptions),
        verb_forms,
        stopwords,
    }
}

/// Register every form in `forms` as an inflection of `lemma`.
fn conjugations(
    table: &[(&'static str, &[&'static str])],
) -> HashMap<&'static str, &'static str> {
    let mut map = HashMap::new();
    for &(lemma, forms) in table {
        map.insert(lemma, lemma);
        for &form in forms {
            map.insert(form, lemma);
        }
    }
    map
}

// -- English ---------------------------------------------------------------

/// Regular English verbs; third person, past and gerund forms are derived.
const ENGLISH_REGULAR_VERBS: &[&str] = &[
    "like", "love", "want", "need", "play", "work", "live", "study", "learn", "walk", "talk",
    "cook", "watch", "travel", "visit", "enjoy", "prefer", "practice", "listen", "help",
    "start", "finish", "open", "close", "call", "ask", "answer", "use", "try", "hope", "plan",
    "stay", "move", "wait", "dance", "clean", "arrive", "change", "hate", "improve", "look",
    "miss", "remember", "return", "seem", "show", "turn", "wash", "wish", "happen",
];

fn english_inflections(base: &'static str) -> Vec<String> {
    let mut forms = Vec::with_capacity(3);
    let consonant_y = base.ends_with('y')
        && !base
            .chars()
            .rev()
            .nth(1)
            .is_some_and(|c| "aeiou".contains(c));

    // third person singular
    if consonant_y {
        forms.push(format!("{}ies", &base[..base.len() - 1]));
    } else if ["s", "sh", "ch", "o"].iter().any(|end| base.ends_with(end)) {
        forms.push(format!("{base}es"));
    } else {
        forms.push(format!("{base}s"));
    }

    // past
    if consonant_y {
        forms.push(format!("{}ied", &base[..base.len() - 1]));
    } else if base.ends_with('e') {
        forms.push(format!("{base}d"));
    } else {
        forms.push(format!("{base}ed"));
    }

    // gerund
    if base.ends_with('e') && !base.ends_with("ee") && base.len() > 2 {
        forms.push(format!("{}ing", &base[..base.len() - 1]));
    } else {
        forms.push(format!("{base}ing"));
    }

    forms
}

static ENGLISH: LazyLock<Lexicon> = LazyLock::new(|| {
    let mut verb_forms: HashMap<&'static str, &'static str> = HashMap::new();
    for &base in ENGLISH_REGULAR_VERBS.iter().chain(IRREGULAR_BASES.iter()) {
        verb_forms.insert(base, base);
        for form in english_inflections(base) {
            // Generated forms live for the program's lifetime alongside the lexicon.
            verb_forms.insert(Box::leak(form.into_boxed_str()), base);
        }
    }
    for (&form, &base) in IRREGULAR_FORMS.iter() {
        verb_forms.insert(form, base);
    }
    // Copula and auxiliaries are tagged separately.
    for aux in [
        "be", "have", "do", "is", "was", "were", "been", "being", "has", "had", "does", "did",
    ] {
        verb_forms.remove(aux);
    }

    build(
        &WordClasses {
            cconj: &["and", "or", "but", "nor", "yet"],
            sconj: &[
                "because", "although", "though", "if", "while", "when", "since", "unless",
                "whether", "that",
            ],
            det: &[
                "the", "a", "an", "this", "these", "those", "my", "your", "his", "her", "its",
                "our", "their", "some", "any", "every", "each", "no", "all", "both", "another",
            ],
            subj: &[
                "i", "you", "he", "she", "it", "we", "they", "i'm", "you're", "he's", "she's",
                "it's", "we're", "they're", "i've", "we've", "they've", "i'll", "i'd",
            ],
            pron: &[
                "me", "him", "us", "them", "myself", "yourself", "himself", "herself", "itself",
                "ourselves", "themselves", "mine", "yours", "hers", "ours", "theirs",
                "something", "nothing", "everything", "anything", "someone", "everyone",
                "nobody", "who", "what", "which", "there", "that's", "what's", "there's",
            ],
            aux: &[
                "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
                "having", "do", "does", "did", "will", "would", "shall", "should", "can",
                "could", "may", "might", "must", "don't", "doesn't", "didn't", "can't",
                "won't", "isn't", "aren't", "wasn't", "weren't", "haven't", "hasn't",
                "wouldn't", "couldn't", "shouldn't",
            ],
            copulas: &[
                "am", "is", "are", "was", "were", "be", "been", "being", "i'm", "you're",
                "he's", "she's", "it's", "we're", "they're",
            ],
            adp: &[
                "in", "on", "at", "to", "for", "of", "with", "by", "from", "about", "into",
                "over", "under", "after", "before", "between", "through", "during", "without",
                "near", "around",
            ],
            adv: &[
                "not", "very", "really", "too", "also", "always", "never", "often", "sometimes",
                "usually", "here", "now", "then", "today", "tomorrow", "yesterday", "quite",
                "just", "still", "already", "again", "well", "so", "much", "more", "most",
                "soon", "later", "together", "almost",
            ],
            adj: &[
                "good", "bad", "big", "small", "new", "old", "happy", "sad", "great", "little",
                "long", "short", "hot", "cold", "beautiful", "nice", "favorite", "delicious",
                "easy", "hard", "important", "young", "different", "same", "tired", "busy",
                "hungry", "interesting", "fast", "slow",
            ],
            intj: &["hello", "hi", "yes", "oh", "wow", "please", "thanks", "okay", "ok", "bye"],
            exceptions: &["thing", "morning", "evening", "ceiling", "building", "red", "bed", "need"],
            extra_stop: &[
                "not", "very", "too", "also", "here", "now", "then", "just", "so", "more",
                "most", "much", "again", "than", "only", "own", "same", "such", "other",
                "yes", "please",
            ],
        },
        verb_forms,
    )
});

// -- Spanish ---------------------------------------------------------------

static SPANISH: LazyLock<Lexicon> = LazyLock::new(|| {
    let verb_forms = conjugations(&[
        ("gustar", &["gusta", "gustan", "gustó", "gustaba", "gustaría"]),
        ("encantar", &["encanta", "encantan", "encantó"]),
        ("querer", &["quiero", "quieres", "quiere", "queremos", "quieren", "quería"]),
        ("tener", &["tengo", "tienes", "tiene", "tenemos", "tienen", "tenía", "tuve"]),
        ("ir", &["voy", "vas", "va", "vamos", "vais", "van", "iba"]),
        ("hacer", &["hago", "haces", "hace", "hacemos", "hacen", "hizo", "hice"]),
        ("poder", &["puedo", "puedes", "puede", "podemos", "pueden", "pude"]),
        ("comer", &["como", "comes", "come", "comemos", "comen", "comí", "comió"]),
        ("hablar", &["hablo", "hablas", "habla", "hablamos", "hablan", "hablé"]),
        ("vivir", &["vivo", "vives", "vive", "vivimos", "viven", "viví"]),
        ("trabajar", &["trabajas", "trabaja", "trabajamos", "trabajan"]),
        ("estudiar", &["estudio", "estudias", "estudia", "estudiamos", "estudian"]),
        ("saber", &["sé", "sabes", "sabe", "sabemos", "saben"]),
        ("decir", &["digo", "dices", "dice", "decimos", "dicen", "dijo"]),
        ("ver", &["veo", "ves", "ve", "vemos", "ven", "vi", "vio"]),
        ("salir", &["salgo", "sales", "sale", "salimos", "salen"]),
        ("beber", &["bebo", "bebes", "bebe", "bebemos", "beben"]),
        ("leer", &["leo", "lees", "lee", "leemos", "leen"]),
        ("escribir", &["escribo", "escribes", "escribe", "escribimos", "escriben"]),
        ("jugar", &["juego", "juegas", "juega", "jugamos", "juegan"]),
        ("necesitar", &["necesito", "necesitas", "necesita", "necesitamos", "necesitan"]),
        ("comprar", &["compro", "compras", "compra", "compramos", "compran"]),
        ("cocinar", &["cocino", "cocinas", "cocinamos", "cocinan"]),
        ("preferir", &["prefiero", "prefieres", "prefiere", "preferimos", "prefieren"]),
        ("llamar", &["llamo", "llamas", "llama", "llamamos", "llaman"]),
        ("viajar", &["viajo", "viajas", "viaja", "viajamos", "viajan"]),
    ]);

    build(
        &WordClasses {
            cconj: &["y", "e", "o", "u", "pero", "ni", "sino"],
            sconj: &["que", "porque", "aunque", "si", "cuando", "mientras", "pues"],
            det: &[
                "el", "la", "los", "las", "un", "una", "unos", "unas", "mi", "mis", "tu", "tus",
                "su", "sus", "este", "esta", "estos", "estas", "ese", "esa", "esos", "esas",
                "nuestro", "nuestra", "nuestros", "nuestras", "algún", "alguna", "ningún",
                "ninguna", "cada", "todo", "toda", "todos", "todas", "otro", "otra",
                "muchos", "muchas",
            ],
            subj: &[
                "yo", "tú", "él", "ella", "nosotros", "nosotras", "vosotros", "vosotras",
                "ellos", "ellas", "usted", "ustedes",
            ],
            pron: &[
                "me", "te", "se", "lo", "le", "nos", "os", "les", "mí", "ti", "conmigo",
                "contigo", "algo", "nada", "alguien", "nadie", "qué", "quién", "eso", "esto",
            ],
            aux: &[
                "soy", "eres", "es", "somos", "sois", "son", "era", "eras", "éramos", "eran",
                "fue", "fui", "ser", "estoy", "estás", "está", "estamos", "están", "estaba",
                "estar", "he", "has", "ha", "hemos", "han", "había", "haber", "sido", "estado",
                "hay",
            ],
            copulas: &[
                "soy", "eres", "es", "somos", "sois", "son", "era", "eras", "éramos", "eran",
                "fue", "fui", "ser", "estoy", "estás", "está", "estamos", "están", "estaba",
                "estar",
            ],
            adp: &[
                "a", "de", "en", "con", "por", "para", "sin", "sobre", "desde", "hasta",
                "entre", "hacia", "al", "del", "según",
            ],
            adv: &[
                "no", "sí", "muy", "bien", "mal", "también", "tampoco", "siempre", "nunca", "ya",
                "aquí", "allí", "hoy", "mañana", "ayer", "ahora", "más", "menos", "mucho",
                "poco", "bastante", "después", "antes", "todavía", "cómo", "dónde", "cuándo",
            ],
            adj: &[
                "bueno", "buena", "malo", "mala", "grande", "pequeño", "pequeña", "nuevo",
                "nueva", "feliz", "rico", "rica", "bonito", "bonita", "favorito", "favorita",
                "delicioso", "deliciosa", "interesante", "difícil", "fácil", "cansado",
                "cansada",
            ],
            intj: &["hola", "gracias", "adiós", "vale", "ojalá", "bueno"],
            exceptions: &[
                "lugar", "mar", "mujer", "hogar", "azúcar", "placer", "taller", "collar",
                "altar", "bar", "par", "éter", "ayer",
            ],
            extra_stop: &[
                "no", "sí", "muy", "más", "menos", "mucho", "poco", "ya", "también", "aquí",
                "ahora", "como", "bien",
            ],
        },
        verb_forms,
    )
});

// -- French ----------------------------------------------------------------

static FRENCH: LazyLock<Lexicon> = LazyLock::new(|| {
    let verb_forms = conjugations(&[
        ("aimer", &["aime", "aimes", "aimons", "aimez", "aiment", "aimé"]),
        ("aller", &["vais", "vas", "va", "allons", "allez", "vont", "allé"]),
        ("faire", &["fais", "fait", "faisons", "faites", "font"]),
        ("manger", &["mange", "manges", "mangeons", "mangez", "mangent", "mangé"]),
        ("parler", &["parle", "parles", "parlons", "parlez", "parlent", "parlé"]),
        ("vouloir", &["veux", "veut", "voulons", "voulez", "veulent", "voudrais"]),
        ("pouvoir", &["peux", "peut", "pouvons", "pouvez", "peuvent"]),
        ("prendre", &["prends", "prend", "prenons", "prenez", "prennent", "pris"]),
        ("boire", &["bois", "boit", "buvons", "buvez", "boivent", "bu"]),
        ("habiter", &["habite", "habites", "habitons", "habitez", "habitent"]),
        ("étudier", &["étudie", "étudies", "étudions", "étudiez", "étudient"]),
        ("venir", &["viens", "vient", "venons", "venez", "viennent", "venu"]),
        ("voir", &["vois", "voit", "voyons", "voyez", "voient", "vu"]),
        ("dire", &["dis", "dit", "disons", "dites", "disent"]),
        ("savoir", &["sais", "sait", "savons", "savez", "savent"]),
        ("lire", &["lis", "lit", "lisons", "lisez", "lisent"]),
        ("écrire", &["écris", "écrit", "écrivons", "écrivez", "écrivent"]),
        ("jouer", &["joue", "joues", "jouons", "jouez", "jouent"]),
        ("travailler", &["travaille", "travailles", "travaillons", "travaillez", "travaillent"]),
        ("adorer", &["adore", "adores", "adorons", "adorez", "adorent"]),
        ("préférer", &["préfère", "préfères", "préférons", "préférez", "préfèrent"]),
        ("regarder", &["regarde", "regardes", "regardons", "regardez", "regardent"]),
        ("écouter", &["écoute", "écoutes", "écoutons", "écoutez", "écoutent"]),
        ("appeler", &["appelle", "appelles", "appelons", "appelez", "appellent"]),
    ]);

    build(
        &WordClasses {
            cconj: &["et", "ou", "mais", "ni", "car", "donc"],
            sconj: &["que", "qu'", "quand", "si", "comme", "lorsque", "puisque", "parce"],
            det: &[
                "le", "la", "les", "l'", "un", "une", "des", "du", "mon", "ma", "mes", "ton",
                "ta", "tes", "son", "sa", "ses", "notre", "nos", "votre", "vos", "leurs", "ce",
                "cet", "cette", "ces", "chaque", "quelques", "tout", "toute", "tous", "toutes",
            ],
            subj: &["je", "j'", "tu", "il", "elle", "on", "nous", "vous", "ils", "elles"],
            pron: &[
                "me", "m'", "te", "t'", "se", "s'", "lui", "leur", "moi", "toi", "eux", "y",
                "ça", "cela", "c'", "ce", "rien", "qui", "quoi",
            ],
            aux: &[
                "suis", "es", "est", "sommes", "êtes", "sont", "étais", "était", "étaient",
                "été", "être", "ai", "as", "a", "avons", "avez", "ont", "avais", "avait", "eu",
                "avoir",
            ],
            copulas: &[
                "suis", "es", "est", "sommes", "êtes", "sont", "étais", "était", "étaient",
                "été", "être",
            ],
            adp: &[
                "à", "de", "d'", "en", "dans", "sur", "sous", "avec", "pour", "par", "sans",
                "chez", "vers", "entre", "au", "aux", "depuis", "pendant", "après", "avant",
            ],
            adv: &[
                "ne", "n'", "pas", "très", "bien", "mal", "aussi", "toujours", "jamais",
                "souvent", "ici", "là", "demain", "hier", "maintenant", "plus", "moins",
                "beaucoup", "peu", "trop", "déjà", "encore", "vraiment",
            ],
            adj: &[
                "bon", "bonne", "mauvais", "grand", "grande", "petit", "petite", "nouveau",
                "nouvelle", "heureux", "heureuse", "beau", "belle", "joli", "jolie", "préféré",
                "préférée", "délicieux", "délicieuse", "facile", "difficile", "intéressant",
                "cher", "chère", "premier", "dernier",
            ],
            intj: &["bonjour", "salut", "merci", "oui", "non", "voilà", "bravo"],
            exceptions: &[
                "mer", "hiver", "fer", "hier", "cahier", "papier", "quartier", "métier",
                "janvier", "février", "panier", "escalier", "cuisinier", "plaisir", "désir",
                "soir", "avenir", "loisir", "cher", "premier", "dernier",
            ],
            extra_stop: &[
                "ne", "n'", "pas", "très", "plus", "moins", "aussi", "bien", "y", "oui", "non",
            ],
        },
        verb_forms,
    )
});

// -- German ----------------------------------------------------------------

static GERMAN: LazyLock<Lexicon> = LazyLock::new(|| {
    let verb_forms = conjugations(&[
        ("mögen", &["mag", "magst", "mögt"]),
        ("essen", &["esse", "isst", "esst", "aß", "gegessen"]),
        ("gehen", &["gehe", "gehst", "geht", "ging", "gegangen"]),
        ("spielen", &["spiele", "spielst", "spielt", "gespielt"]),
        ("trinken", &["trinke", "trinkst", "trinkt", "getrunken"]),
        ("lernen", &["lerne", "lernst", "lernt", "gelernt"]),
        ("machen", &["mache", "machst", "macht", "gemacht"]),
        ("wohnen", &["wohne", "wohnst", "wohnt", "gewohnt"]),
        ("kommen", &["komme", "kommst", "kommt", "kam", "gekommen"]),
        ("sprechen", &["spreche", "sprichst", "spricht", "gesprochen"]),
        ("lesen", &["lese", "liest", "gelesen"]),
        ("sehen", &["sehe", "siehst", "sieht", "gesehen"]),
        ("fahren", &["fahre", "fährst", "fährt", "gefahren"]),
        ("arbeiten", &["arbeite", "arbeitest", "arbeitet", "gearbeitet"]),
        ("kaufen", &["kaufe", "kaufst", "kauft", "gekauft"]),
        ("finden", &["finde", "findest", "findet", "gefunden"]),
        ("heißen", &["heiße", "heißt"]),
        ("lieben", &["liebe", "liebst", "liebt", "geliebt"]),
        ("brauchen", &["brauche", "brauchst", "braucht", "gebraucht"]),
        ("kochen", &["koche", "kochst", "kocht", "gekocht"]),
    ]);

    build(
        &WordClasses {
            cconj: &["und", "oder", "aber", "denn", "sondern", "doch"],
            sconj: &["dass", "weil", "wenn", "ob", "als", "obwohl", "damit"],
            det: &[
                "der", "die", "das", "den", "dem", "des", "ein", "eine", "einen", "einem",
                "einer", "eines", "mein", "meine", "meinen", "meinem", "dein", "deine", "sein",
                "seine", "ihre", "unser", "unsere", "euer", "kein", "keine", "keinen",
                "dieser", "diese", "dieses", "jeder", "jede", "jedes", "alle",
            ],
            subj: &["ich", "du", "er", "sie", "es", "wir", "ihr", "man"],
            pron: &[
                "mich", "dich", "mir", "dir", "ihn", "ihm", "uns", "euch", "ihnen", "sich",
                "etwas", "nichts", "jemand", "niemand", "was", "wer",
            ],
            aux: &[
                "bin", "bist", "ist", "sind", "seid", "war", "warst", "waren", "gewesen", "habe",
                "hast", "hat", "haben", "habt", "hatte", "hatten", "werde", "wirst", "wird",
                "werden", "wurde", "kann", "kannst", "können", "muss", "musst", "müssen",
                "will", "willst", "wollen", "soll", "sollen", "darf", "möchte", "möchten",
            ],
            copulas: &["bin", "bist", "ist", "sind", "seid", "war", "warst", "waren", "gewesen"],
            adp: &[
                "in", "im", "an", "am", "auf", "mit", "von", "vom", "zu", "zum", "zur", "für",
                "aus", "bei", "beim", "nach", "über", "unter", "vor", "hinter", "neben",
                "zwischen", "durch", "gegen", "ohne", "um", "seit", "bis",
            ],
            adv: &[
                "nicht", "sehr", "gern", "gerne", "auch", "immer", "nie", "oft", "hier", "dort",
                "da", "heute", "morgen", "gestern", "jetzt", "noch", "schon", "viel", "mehr",
                "ganz", "wirklich",
            ],
            adj: &[
                "gut", "schlecht", "groß", "klein", "neu", "alt", "schön", "glücklich", "lecker",
                "einfach", "schwer", "interessant", "müde", "guten", "schönen",
            ],
            intj: &["hallo", "danke", "ja", "nein", "tschüss", "bitte"],
            exceptions: &["morgen", "guten", "schönen", "garten", "wagen", "kuchen", "essen"],
            extra_stop: &[
                "nicht", "sehr", "auch", "noch", "schon", "da", "hier", "ja", "nein", "mehr",
            ],
        },
        verb_forms,
    )
});
