//! Localized user-facing messages for failures
//!
//! Every table below is an exhaustive `match` over the message kind and
//! [`Language`], so adding a language or a kind without filling in its text is a
//! compile error rather than a silent gap.

use std::fmt::Display;

/// Display languages with translated message tables
///
/// English is the base language: any language name without a table resolves to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Hindi,
    Spanish,
    French,
    German,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Hindi,
        Language::Spanish,
        Language::French,
        Language::German,
    ];

    /// Matches a display name or ISO 639-1 code, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Language::English),
            "hindi" | "hi" | "हिन्दी" | "हिंदी" => Some(Language::Hindi),
            "spanish" | "es" | "español" | "espanol" => Some(Language::Spanish),
            "french" | "fr" | "français" | "francais" => Some(Language::French),
            "german" | "de" | "deutsch" => Some(Language::German),
            _ => None,
        }
    }

    /// Like [`Language::from_name`], falling back to English
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Language::English)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
        }
    }
}

/// Failure taxonomy as presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SafetyBlocked,
    Default,
}

/// Classifies a failure by its message
pub fn classify(error: &dyn Display) -> ErrorKind {
    let message = error.to_string();
    if message.contains("SAFETY") || message.to_lowercase().contains("blocked") {
        ErrorKind::SafetyBlocked
    } else {
        ErrorKind::Default
    }
}

/// Localized text for a failed chat turn
pub fn translate_error(error: &dyn Display, language: &str) -> &'static str {
    error_message(classify(error), Language::resolve(language))
}

pub fn error_message(kind: ErrorKind, language: Language) -> &'static str {
    use ErrorKind::*;
    use Language::*;

    match (kind, language) {
        (SafetyBlocked, English) => "I can't help with that request because it was flagged by content safety filters. Try rephrasing what you're looking for.",
        (SafetyBlocked, Hindi) => "यह अनुरोध सामग्री सुरक्षा फ़िल्टर द्वारा रोका गया है। कृपया अपना अनुरोध दूसरे शब्दों में लिखें।",
        (SafetyBlocked, Spanish) => "No puedo ayudar con esa solicitud porque fue bloqueada por los filtros de seguridad de contenido. Intenta reformular lo que buscas.",
        (SafetyBlocked, French) => "Je ne peux pas répondre à cette demande car elle a été bloquée par les filtres de sécurité. Essayez de la reformuler.",
        (SafetyBlocked, German) => "Diese Anfrage wurde von den Inhaltssicherheitsfiltern blockiert. Bitte formuliere sie anders.",
        (Default, English) => "Sorry, I couldn't reach the recommendation service right now. Please check your connection and try again.",
        (Default, Hindi) => "क्षमा करें, अभी सुझाव सेवा से संपर्क नहीं हो सका। कृपया अपना कनेक्शन जाँचें और फिर से प्रयास करें।",
        (Default, Spanish) => "Lo siento, no pude conectar con el servicio de recomendaciones. Revisa tu conexión e inténtalo de nuevo.",
        (Default, French) => "Désolé, le service de recommandations est momentanément injoignable. Vérifiez votre connexion et réessayez.",
        (Default, German) => "Der Empfehlungsdienst ist gerade nicht erreichbar. Bitte prüfe deine Verbindung und versuche es erneut.",
    }
}

/// Localized text for a failed cold start, shown next to a retry action
pub fn cold_start_message(language: &str) -> &'static str {
    match Language::resolve(language) {
        Language::English => "We couldn't load your starter recommendations. Tap retry to try again.",
        Language::Hindi => "शुरुआती सुझाव लोड नहीं हो सके। फिर से प्रयास करने के लिए रीट्राई दबाएँ।",
        Language::Spanish => "No pudimos cargar tus recomendaciones iniciales. Pulsa reintentar para volver a intentarlo.",
        Language::French => "Impossible de charger vos premières recommandations. Appuyez sur réessayer.",
        Language::German => "Deine ersten Empfehlungen konnten nicht geladen werden. Tippe auf „Erneut versuchen“.",
    }
}

/// Error codes reported by the authentication provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    AlreadyInUse,
    InvalidCredential,
    TooManyRequests,
    NetworkFailed,
    PopupClosed,
    Unknown,
}

impl AuthErrorCode {
    /// Parses a provider code, with or without an `auth/` prefix
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        let code = code.strip_prefix("auth/").unwrap_or(code);
        match code {
            "already-in-use" | "email-already-in-use" => AuthErrorCode::AlreadyInUse,
            "invalid-credential" | "wrong-password" | "user-not-found" | "invalid-email" => {
                AuthErrorCode::InvalidCredential
            }
            "too-many-requests" => AuthErrorCode::TooManyRequests,
            "network-failed" | "network-request-failed" => AuthErrorCode::NetworkFailed,
            "popup-closed" | "popup-closed-by-user" | "cancelled-popup-request" => {
                AuthErrorCode::PopupClosed
            }
            _ => AuthErrorCode::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorCode::AlreadyInUse => "already-in-use",
            AuthErrorCode::InvalidCredential => "invalid-credential",
            AuthErrorCode::TooManyRequests => "too-many-requests",
            AuthErrorCode::NetworkFailed => "network-failed",
            AuthErrorCode::PopupClosed => "popup-closed",
            AuthErrorCode::Unknown => "unknown",
        }
    }
}

/// Localized text for an authentication provider error code
pub fn auth_message(code: &str, language: &str) -> &'static str {
    use AuthErrorCode::*;
    use Language::*;

    match (AuthErrorCode::parse(code), Language::resolve(language)) {
        (AlreadyInUse, English) => "An account with this email already exists. Try logging in instead.",
        (AlreadyInUse, Hindi) => "इस ईमेल से पहले से एक खाता मौजूद है। कृपया लॉग इन करें।",
        (AlreadyInUse, Spanish) => "Ya existe una cuenta con este correo. Intenta iniciar sesión.",
        (AlreadyInUse, French) => "Un compte existe déjà avec cet e-mail. Essayez de vous connecter.",
        (AlreadyInUse, German) => "Für diese E-Mail gibt es bereits ein Konto. Melde dich stattdessen an.",
        (InvalidCredential, English) => "Incorrect email or password.",
        (InvalidCredential, Hindi) => "ईमेल या पासवर्ड गलत है।",
        (InvalidCredential, Spanish) => "Correo o contraseña incorrectos.",
        (InvalidCredential, French) => "E-mail ou mot de passe incorrect.",
        (InvalidCredential, German) => "E-Mail oder Passwort ist falsch.",
        (TooManyRequests, English) => "Too many attempts. Please wait a moment and try again.",
        (TooManyRequests, Hindi) => "बहुत अधिक प्रयास हो गए। कृपया कुछ देर बाद फिर से प्रयास करें।",
        (TooManyRequests, Spanish) => "Demasiados intentos. Espera un momento e inténtalo de nuevo.",
        (TooManyRequests, French) => "Trop de tentatives. Patientez un instant puis réessayez.",
        (TooManyRequests, German) => "Zu viele Versuche. Bitte warte kurz und versuche es erneut.",
        (NetworkFailed, English) => "Network error. Check your connection and try again.",
        (NetworkFailed, Hindi) => "नेटवर्क त्रुटि। अपना कनेक्शन जाँचें और फिर से प्रयास करें।",
        (NetworkFailed, Spanish) => "Error de red. Revisa tu conexión e inténtalo de nuevo.",
        (NetworkFailed, French) => "Erreur réseau. Vérifiez votre connexion et réessayez.",
        (NetworkFailed, German) => "Netzwerkfehler. Prüfe deine Verbindung und versuche es erneut.",
        (PopupClosed, English) => "The sign-in window was closed before finishing.",
        (PopupClosed, Hindi) => "साइन-इन विंडो पूरा होने से पहले बंद हो गई।",
        (PopupClosed, Spanish) => "La ventana de inicio de sesión se cerró antes de terminar.",
        (PopupClosed, French) => "La fenêtre de connexion a été fermée avant la fin.",
        (PopupClosed, German) => "Das Anmeldefenster wurde vor dem Abschluss geschlossen.",
        (Unknown, English) => "Something went wrong while signing in. Please try again.",
        (Unknown, Hindi) => "साइन इन करते समय कुछ गलत हो गया। कृपया फिर से प्रयास करें।",
        (Unknown, Spanish) => "Algo salió mal al iniciar sesión. Inténtalo de nuevo.",
        (Unknown, French) => "Un problème est survenu lors de la connexion. Veuillez réessayer.",
        (Unknown, German) => "Bei der Anmeldung ist etwas schiefgelaufen. Bitte versuche es erneut.",
    }
}
