//! Display strings for the three UI locales.
//!
//! Lookup is total: English defines every key, and the other locales fall
//! back to English for anything they leave out.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Self::En, Self::Es, Self::Fr];
    pub const FALLBACK: Locale = Self::En;

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Self::En),
            "es" | "spanish" | "español" => Some(Self::Es),
            "fr" | "french" | "français" => Some(Self::Fr),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Es => "ES",
            Self::Fr => "FR",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::En => Self::Es,
            Self::Es => Self::Fr,
            Self::Fr => Self::En,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    About,
    HeroTitle,
    HeroSubtitle,
    UploadTitle,
    UploadPrompt,
    UploadHint,
    FilesSelected,
    Clear,
    NumberOfQuestions,
    QuizLanguage,
    GenerateStudyMaterials,
    GenerateInteractiveQuiz,
    Generating,
    GeneratingPleaseWait,
    ErrorTitle,
    ErrorUpload,
    ErrorGenerate,
    SummaryTitle,
    CefrLevelTitle,
    StudyGuideTitle,
    ExercisesTitle,
    PracticeTaskTitle,
    Answer,
    QuizCompleteTitle,
    YourScore,
    RestartQuiz,
    Done,
    InteractiveQuizTitle,
    Question,
    NextQuestion,
    Finish,
    AboutTitle,
    AboutIntro,
    AboutAuthor,
    AboutIdea,
    AboutThanks,
    HomeKeyHints,
    QuizKeyHints,
    QuizFinishedKeyHints,
}

impl MessageKey {
    pub const ALL: [MessageKey; 39] = [
        Self::About,
        Self::HeroTitle,
        Self::HeroSubtitle,
        Self::UploadTitle,
        Self::UploadPrompt,
        Self::UploadHint,
        Self::FilesSelected,
        Self::Clear,
        Self::NumberOfQuestions,
        Self::QuizLanguage,
        Self::GenerateStudyMaterials,
        Self::GenerateInteractiveQuiz,
        Self::Generating,
        Self::GeneratingPleaseWait,
        Self::ErrorTitle,
        Self::ErrorUpload,
        Self::ErrorGenerate,
        Self::SummaryTitle,
        Self::CefrLevelTitle,
        Self::StudyGuideTitle,
        Self::ExercisesTitle,
        Self::PracticeTaskTitle,
        Self::Answer,
        Self::QuizCompleteTitle,
        Self::YourScore,
        Self::RestartQuiz,
        Self::Done,
        Self::InteractiveQuizTitle,
        Self::Question,
        Self::NextQuestion,
        Self::Finish,
        Self::AboutTitle,
        Self::AboutIntro,
        Self::AboutAuthor,
        Self::AboutIdea,
        Self::AboutThanks,
        Self::HomeKeyHints,
        Self::QuizKeyHints,
        Self::QuizFinishedKeyHints,
    ];
}

/// Resolves display strings for one locale. Passed explicitly to whatever
/// renders text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn t(&self, key: MessageKey) -> &'static str {
        lookup(self.locale, key)
            .or_else(|| lookup(Locale::FALLBACK, key))
            .unwrap_or(MISSING)
    }

    /// Like `t`, replacing each `{{name}}` placeholder with its value.
    pub fn t_with(&self, key: MessageKey, replacements: &[(&str, &str)]) -> String {
        let mut text = self.t(key).to_string();
        for (name, value) in replacements {
            text = text.replace(&format!("{{{{{name}}}}}"), value);
        }
        text
    }
}

/// Shown only if neither the active nor the fallback catalog has the key.
const MISSING: &str = "???";

fn lookup(locale: Locale, key: MessageKey) -> Option<&'static str> {
    match locale {
        Locale::En => Some(english(key)),
        Locale::Es => spanish(key),
        Locale::Fr => french(key),
    }
}

fn english(key: MessageKey) -> &'static str {
    use MessageKey as K;
    match key {
        K::About => "About",
        K::HeroTitle => "Transform Your Notes into Interactive Lessons",
        K::HeroSubtitle => "Stop just reading your notes. Upload a photo of your handwritten studies, and let our AI create personalized quizzes, guides, and practice tasks to supercharge your learning!",
        K::UploadTitle => "Upload Your Notes",
        K::UploadPrompt => "Type or drop image paths, then press Enter",
        K::UploadHint => "PNG, JPG, GIF up to 10MB",
        K::FilesSelected => "{{count}} file(s) selected",
        K::Clear => "Clear",
        K::NumberOfQuestions => "Number of Questions",
        K::QuizLanguage => "Quiz Language",
        K::GenerateStudyMaterials => "Generate Study Materials",
        K::GenerateInteractiveQuiz => "Generate Interactive Quiz",
        K::Generating => "Generating",
        K::GeneratingPleaseWait => "Generating, please be patient",
        K::ErrorTitle => "Error",
        K::ErrorUpload => "Please upload at least one image.",
        K::ErrorGenerate => "Failed to generate {{type}}. The model may be unable to process the image, or an API error occurred. Please try again with a clearer image.",
        K::SummaryTitle => "Extracted Content Summary",
        K::CefrLevelTitle => "Estimated CEFR Level",
        K::StudyGuideTitle => "Study Guide:",
        K::ExercisesTitle => "Exercises",
        K::PracticeTaskTitle => "Practice Task",
        K::Answer => "Answer",
        K::QuizCompleteTitle => "Quiz Complete!",
        K::YourScore => "Your score",
        K::RestartQuiz => "Restart Quiz",
        K::Done => "Done",
        K::InteractiveQuizTitle => "Interactive Quiz",
        K::Question => "Question",
        K::NextQuestion => "Next Question",
        K::Finish => "Finish",
        K::AboutTitle => "About FusionStudies",
        K::AboutIntro => "Welcome to FusionStudies! This application was created for all the students out there who need a little extra help with French. The goal is to make studying a new language easier and a lot more interactive.",
        K::AboutAuthor => "It was built by a 13-year-old developer with a passion for coding and building things that can help people, like turning messy handwritten notes into a structured quiz.",
        K::AboutIdea => "FusionStudies is built on the idea that learning should be active, not passive. Instead of just re-reading your notes, you can use this app to test your knowledge, identify areas where you need more practice, and get a clearer understanding of grammar and vocabulary.",
        K::AboutThanks => "Thank you for trying out this project. Happy studying!",
        K::HomeKeyHints => "F2 materials  F3 quiz  F5/F6 questions  F7 quiz language  F8 UI language  F9 clear  F10 about  Esc home",
        K::QuizKeyHints => "1-4 choose  Enter next  Esc home",
        K::QuizFinishedKeyHints => "F4 restart  Enter done",
    }
}

fn spanish(key: MessageKey) -> Option<&'static str> {
    use MessageKey as K;
    let text = match key {
        K::About => "Sobre mí",
        K::HeroTitle => "Transforma Tus Apuntes en Lecciones Interactivas",
        K::HeroSubtitle => "Deja de solo leer tus apuntes. ¡Sube una foto de tus estudios escritos a mano y deja que nuestra IA cree cuestionarios, guías y tareas de práctica personalizadas para potenciar tu aprendizaje!",
        K::UploadTitle => "Sube Tus Apuntes",
        K::UploadPrompt => "Escribe o arrastra rutas de imágenes y pulsa Enter",
        K::UploadHint => "PNG, JPG, GIF de hasta 10MB",
        K::FilesSelected => "{{count}} archivo(s) seleccionado(s)",
        K::Clear => "Limpiar",
        K::NumberOfQuestions => "Número de Preguntas",
        K::QuizLanguage => "Idioma del Cuestionario",
        K::GenerateStudyMaterials => "Generar Material de Estudio",
        K::GenerateInteractiveQuiz => "Generar Cuestionario Interactivo",
        K::Generating => "Generando",
        K::GeneratingPleaseWait => "Generando, por favor espera",
        K::ErrorTitle => "Error",
        K::ErrorUpload => "Por favor, sube al menos una imagen.",
        K::ErrorGenerate => "No se pudo generar {{type}}. Es posible que el modelo no pueda procesar la imagen o que haya ocurrido un error de API. Inténtalo de nuevo con una imagen más clara.",
        K::SummaryTitle => "Resumen del Contenido Extraído",
        K::CefrLevelTitle => "Nivel MCER Estimado",
        K::StudyGuideTitle => "Guía de Estudio:",
        K::ExercisesTitle => "Ejercicios",
        K::PracticeTaskTitle => "Tarea de Práctica",
        K::Answer => "Respuesta",
        K::QuizCompleteTitle => "¡Cuestionario Completo!",
        K::YourScore => "Tu puntuación",
        K::RestartQuiz => "Reiniciar Cuestionario",
        K::Done => "Hecho",
        K::InteractiveQuizTitle => "Cuestionario Interactivo",
        K::Question => "Pregunta",
        K::NextQuestion => "Siguiente Pregunta",
        K::Finish => "Finalizar",
        K::AboutTitle => "Sobre FusionStudies",
        K::AboutIntro => "¡Bienvenido a FusionStudies! Esta aplicación fue creada para todos los estudiantes que necesitan un poco de ayuda extra con el francés. El objetivo es que estudiar un nuevo idioma sea más fácil y mucho más interactivo.",
        K::AboutAuthor => "Fue construida por un desarrollador de 13 años apasionado por la programación y por construir cosas que puedan ayudar a la gente, como convertir apuntes desordenados en un cuestionario estructurado.",
        K::AboutIdea => "FusionStudies se basa en la idea de que el aprendizaje debe ser activo, no pasivo. En lugar de simplemente releer tus apuntes, puedes usar esta aplicación para poner a prueba tus conocimientos, identificar áreas en las que necesitas más práctica y obtener una comprensión más clara de la gramática y el vocabulario.",
        K::AboutThanks => "Gracias por probar este proyecto. ¡Feliz estudio!",
        K::HomeKeyHints => "F2 material  F3 cuestionario  F5/F6 preguntas  F7 idioma del cuestionario  F8 idioma de la interfaz  F9 limpiar  F10 sobre  Esc inicio",
        K::QuizKeyHints => "1-4 elegir  Enter siguiente  Esc inicio",
        K::QuizFinishedKeyHints => "F4 reiniciar  Enter terminar",
    };
    Some(text)
}

fn french(key: MessageKey) -> Option<&'static str> {
    use MessageKey as K;
    let text = match key {
        K::About => "À propos",
        K::HeroTitle => "Transformez Vos Notes en Leçons Interactives",
        K::HeroSubtitle => "Arrêtez de simplement relire vos notes. Téléchargez une photo de vos études manuscrites et laissez notre IA créer des quiz, des guides et des exercices personnalisés pour booster votre apprentissage !",
        K::UploadTitle => "Téléchargez Vos Notes",
        K::UploadPrompt => "Saisissez ou déposez des chemins d'images, puis Entrée",
        K::UploadHint => "PNG, JPG, GIF jusqu'à 10Mo",
        K::FilesSelected => "{{count}} fichier(s) sélectionné(s)",
        K::Clear => "Effacer",
        K::NumberOfQuestions => "Nombre de Questions",
        K::QuizLanguage => "Langue du Quiz",
        K::GenerateStudyMaterials => "Générer du Matériel d'Étude",
        K::GenerateInteractiveQuiz => "Générer un Quiz Interactif",
        K::Generating => "Génération",
        K::GeneratingPleaseWait => "Génération en cours, veuillez patienter",
        K::ErrorTitle => "Erreur",
        K::ErrorUpload => "Veuillez télécharger au moins une image.",
        K::ErrorGenerate => "Échec de la génération de {{type}}. Le modèle est peut-être incapable de traiter l'image, ou une erreur API s'est produite. Veuillez réessayer avec une image plus claire.",
        K::SummaryTitle => "Résumé du Contenu Extrait",
        K::CefrLevelTitle => "Niveau CECRL Estimé",
        K::StudyGuideTitle => "Guide d'Étude :",
        K::ExercisesTitle => "Exercices",
        K::PracticeTaskTitle => "Tâche Pratique",
        K::Answer => "Réponse",
        K::QuizCompleteTitle => "Quiz Terminé !",
        K::YourScore => "Votre score",
        K::RestartQuiz => "Recommencer le Quiz",
        K::Done => "Terminé",
        K::InteractiveQuizTitle => "Quiz Interactif",
        K::Question => "Question",
        K::NextQuestion => "Question Suivante",
        K::Finish => "Terminer",
        K::AboutTitle => "À propos de FusionStudies",
        K::AboutIntro => "Bienvenue sur FusionStudies ! Cette application a été créée pour tous les étudiants qui ont besoin d'un petit coup de pouce en français. L'objectif est de rendre l'étude d'une nouvelle langue plus facile et beaucoup plus interactive.",
        K::AboutAuthor => "Elle a été construite par un développeur de 13 ans passionné par le codage et la création de choses qui peuvent aider les gens, comme transformer des notes manuscrites désordonnées en un quiz structuré.",
        K::AboutIdea => "FusionStudies est basé sur l'idée que l'apprentissage doit être actif, et non passif. Au lieu de simplement relire vos notes, vous pouvez utiliser cette application pour tester vos connaissances, identifier les domaines où vous avez besoin de plus de pratique et obtenir une meilleure compréhension de la grammaire et du vocabulaire.",
        K::AboutThanks => "Merci d'avoir essayé ce projet. Bonne étude !",
        K::HomeKeyHints => "F2 matériel  F3 quiz  F5/F6 questions  F7 langue du quiz  F8 langue de l'interface  F9 effacer  F10 à propos  Échap accueil",
        K::QuizKeyHints => "1-4 choisir  Entrée suivante  Échap accueil",
        K::QuizFinishedKeyHints => "F4 recommencer  Entrée terminer",
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_an_english_string() {
        for key in MessageKey::ALL {
            assert!(!english(key).trim().is_empty(), "empty English string for {key:?}");
        }
    }

    #[test]
    fn test_every_locale_resolves_every_key() {
        for locale in Locale::ALL {
            let translator = Translator::new(locale);
            for key in MessageKey::ALL {
                assert!(!translator.t(key).is_empty(), "{locale:?} missing {key:?}");
            }
        }
    }

    #[test]
    fn test_fallback_locale_catalog_is_complete() {
        for key in MessageKey::ALL {
            assert!(lookup(Locale::FALLBACK, key).is_some(), "fallback missing {key:?}");
        }
    }

    #[test]
    fn test_spanish_and_french_translate_every_key() {
        for key in MessageKey::ALL {
            assert!(spanish(key).is_some(), "Spanish missing {key:?}");
            assert!(french(key).is_some(), "French missing {key:?}");
        }
    }

    #[test]
    fn test_about_paragraphs_are_localized() {
        let french = Translator::new(Locale::Fr);
        let spanish = Translator::new(Locale::Es);
        for key in [MessageKey::AboutIntro, MessageKey::AboutAuthor] {
            assert_ne!(french.t(key), english(key));
            assert_ne!(spanish.t(key), english(key));
        }
        assert!(french.t(MessageKey::AboutIntro).starts_with("Bienvenue sur FusionStudies"));
        assert_eq!(french.t(MessageKey::Clear), "Effacer");
    }

    #[test]
    fn test_placeholders_are_substituted() {
        let translator = Translator::new(Locale::Es);
        assert_eq!(
            translator.t_with(MessageKey::FilesSelected, &[("count", "2")]),
            "2 archivo(s) seleccionado(s)"
        );
        let message = Translator::default().t_with(MessageKey::ErrorGenerate, &[("type", "quiz")]);
        assert!(message.starts_with("Failed to generate quiz."));
        assert!(!message.contains("{{"));
    }

    #[test]
    fn test_locale_parse_and_cycle() {
        assert_eq!(Locale::parse("ES"), Some(Locale::Es));
        assert_eq!(Locale::parse("de"), None);
        assert_eq!(Locale::En.next().next().next(), Locale::En);
    }
}
