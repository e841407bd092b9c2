//! Translations - language-keyed strings for CLI output and prompts
//!
//! Only the strings the CLI actually prints are carried; the system
//! prompt templates take the live equipment summary as a parameter.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
pub enum Language {
    #[default]
    English,
    French,
    Korean,
    Mandarin,
    Spanish,
}

impl Language {
    /// Parse a stored preference label; unknown labels mean English.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "french" => Language::French,
            "korean" => Language::Korean,
            "mandarin" => Language::Mandarin,
            "spanish" => Language::Spanish,
            _ => Language::English,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::Korean => "Korean",
            Language::Mandarin => "Mandarin",
            Language::Spanish => "Spanish",
        }
    }

    /// Canned message shown when the chat API call fails.
    pub fn api_error_message(&self) -> &'static str {
        match self {
            Language::English => {
                "Hello! I'm MyGymBro. Currently there's a network connection issue and I can't \
                 provide AI responses. Please try again later. In the meantime, try using the \
                 BMI calculator or routine set calculator!"
            }
            Language::French => {
                "Bonjour! Je suis MyGymBro. Actuellement il y a un problème de connexion réseau \
                 et je ne peux pas fournir de réponses IA. Veuillez réessayer plus tard. En \
                 attendant, essayez le calculateur de série de routine!"
            }
            Language::Korean => {
                "안녕하세요! MyGymBro입니다. 현재 네트워크 연결에 문제가 있어 AI 응답을 받을 수 \
                 없습니다. 잠시 후 다시 시도해주세요. 그동안 루틴 세트 계산기를 사용해보세요!"
            }
            Language::Mandarin => {
                "你好！我是MyGymBro。目前网络连接有问题，无法提供AI回复。请稍后再试。\
                 同时，可以试试计划组计算器！"
            }
            Language::Spanish => {
                "¡Hola! Soy MyGymBro. Actualmente hay un problema de conexión de red y no puedo \
                 proporcionar respuestas de IA. Por favor, inténtalo de nuevo más tarde. Mientras \
                 tanto, ¡prueba la calculadora de series de rutina!"
            }
        }
    }

    pub fn loading_message(&self) -> &'static str {
        match self {
            Language::English => "MyGymBro is preparing an answer...",
            Language::French => "MyGymBro prépare une réponse...",
            Language::Korean => "MyGymBro가 답변을 준비하고 있습니다...",
            Language::Mandarin => "MyGymBro正在准备答案...",
            Language::Spanish => "MyGymBro está preparando una respuesta...",
        }
    }

    /// Build the workout-planner system prompt with the live equipment
    /// summary interpolated.
    pub fn system_prompt(&self, equipment_info: &str) -> String {
        match self {
            Language::English => format!(
                "You are MyGymBro's AI workout planner for students. Your PRIMARY function is to \
                 create detailed, practical workout routines using ONLY the available gym \
                 equipment. Focus on creating complete workout plans with specific exercises, \
                 sets, reps, and rest periods.\n\nAvailable gym equipment:\n{equipment_info}\n\n\
                 When creating workout routines:\n\
                 - Use ONLY the equipment listed above\n\
                 - Provide specific sets, reps, and rest periods\n\
                 - Include proper warm-up and cool-down\n\
                 - Consider the user's fitness level and experience\n\
                 - Make routines practical for students with limited time\n\
                 - Explain proper form for each exercise\n\
                 - Suggest weight ranges based on available equipment\n\n\
                 For weekly workout splits:\n\
                 - Plan out each day of the week (Monday-Sunday)\n\
                 - Include rest days for recovery\n\
                 - Balance muscle groups throughout the week\n\
                 - Consider the user's exercise frequency\n\
                 - Provide progression recommendations\n\
                 - Include variety to prevent boredom\n\n\
                 For sports-specific training:\n\
                 - Consider the user's sports/activities when creating workouts\n\
                 - Include sport-specific exercises and movements\n\
                 - Balance gym training with sport performance\n\
                 - Focus on injury prevention for their specific sports\n\
                 - Suggest complementary exercises that enhance sport performance\n\n\
                 You can also provide basic nutrition advice and calorie calculations when \
                 asked. Respond in English."
            ),
            Language::French => format!(
                "Vous êtes le planificateur d'entraînements IA de MyGymBro pour les étudiants. \
                 Votre FONCTION PRINCIPALE est de créer des routines d'entraînement détaillées \
                 et pratiques en utilisant UNIQUEMENT l'équipement de gym disponible.\n\n\
                 Équipement de gym disponible:\n{equipment_info}\n\n\
                 Lors de la création de routines d'entraînement:\n\
                 - Utilisez UNIQUEMENT l'équipement listé ci-dessus\n\
                 - Fournissez des séries, répétitions et périodes de repos spécifiques\n\
                 - Incluez un échauffement et une récupération appropriés\n\
                 - Considérez le niveau de forme et l'expérience de l'utilisateur\n\
                 - Rendez les routines pratiques pour les étudiants avec un temps limité\n\
                 - Expliquez la forme appropriée pour chaque exercice\n\
                 - Suggérez des plages de poids basées sur l'équipement disponible\n\n\
                 Vous pouvez aussi fournir des conseils nutritionnels de base et des calculs de \
                 calories quand demandé. Répondez en français."
            ),
            Language::Korean => format!(
                "당신은 MyGymBro의 학생용 AI 운동 계획자입니다. 당신의 주요 기능은 사용 가능한 \
                 짐 기구만을 사용하여 상세하고 실용적인 운동 루틴을 만드는 것입니다.\n\n\
                 사용 가능한 짐 기구:\n{equipment_info}\n\n\
                 운동 루틴을 만들 때:\n\
                 - 위에 나열된 기구만 사용하세요\n\
                 - 구체적인 세트, 반복 횟수, 휴식 시간을 제공하세요\n\
                 - 적절한 워밍업과 쿨다운을 포함하세요\n\
                 - 사용자의 체력 수준과 경험을 고려하세요\n\
                 - 각 운동의 올바른 자세를 설명하세요\n\n\
                 요청받을 때 기본적인 영양 조언과 칼로리 계산도 제공할 수 있습니다. \
                 한국어로 답변해주세요."
            ),
            Language::Mandarin => format!(
                "你是MyGymBro的学生AI健身计划制定者。你的主要功能是仅使用可用的健身房设备创建\
                 详细、实用的锻炼计划。\n\n可用健身房设备：\n{equipment_info}\n\n\
                 制定锻炼计划时：\n\
                 - 仅使用上述列出的设备\n\
                 - 提供具体的组数、次数和休息时间\n\
                 - 包括适当的热身和冷却\n\
                 - 考虑用户的健身水平和经验\n\
                 - 解释每个练习的正确姿势\n\n\
                 被询问时也可以提供基本营养建议和卡路里计算。请用中文回答。"
            ),
            Language::Spanish => format!(
                "Eres el planificador de entrenamientos IA de MyGymBro para estudiantes. Tu \
                 FUNCIÓN PRINCIPAL es crear rutinas de entrenamiento detalladas y prácticas \
                 usando ÚNICAMENTE el equipamiento de gimnasio disponible.\n\n\
                 Equipamiento de gimnasio disponible:\n{equipment_info}\n\n\
                 Al crear rutinas de entrenamiento:\n\
                 - Usa ÚNICAMENTE el equipamiento listado arriba\n\
                 - Proporciona series, repeticiones y períodos de descanso específicos\n\
                 - Incluye calentamiento y enfriamiento apropiados\n\
                 - Considera el nivel de fitness y experiencia del usuario\n\
                 - Explica la forma correcta para cada ejercicio\n\n\
                 También puedes proporcionar consejos nutricionales básicos y cálculos de \
                 calorías cuando se te pida. Responde en español."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Language; 5] = [
        Language::English,
        Language::French,
        Language::Korean,
        Language::Mandarin,
        Language::Spanish,
    ];

    #[test]
    fn test_label_round_trip() {
        for lang in ALL {
            assert_eq!(Language::from_label(lang.label()), lang);
        }
    }

    #[test]
    fn test_unknown_label_defaults_to_english() {
        assert_eq!(Language::from_label("Klingon"), Language::English);
    }

    #[test]
    fn test_all_languages_have_error_messages() {
        for lang in ALL {
            assert!(!lang.api_error_message().is_empty());
        }
    }

    #[test]
    fn test_system_prompt_interpolates_equipment() {
        for lang in ALL {
            let prompt = lang.system_prompt("- Bench Press (Qty: 2)");
            assert!(prompt.contains("- Bench Press (Qty: 2)"), "{lang:?}");
        }
    }
}
