use crate::core::config::ReplyLanguage;
use crate::core::models::ModelQuery;

pub const SYSTEM_INSTRUCTION_EN: &str = "You are an assistant that summarizes email threads.";

pub const SYSTEM_INSTRUCTION_ES: &str =
    "Eres un asistente que resume hilos de correos electrónicos. Responde siempre en español.";

pub const TASK_INSTRUCTIONS_EN: &str = "You will receive an email chain. \
    Return a JSON object with the following keys: \
    summary - a brief summary of the thread; \
    people - the names of all people involved; \
    actions - bullet point action items; \
    response - a possible reply template using blanks (_____) for missing information.";

pub const TASK_INSTRUCTIONS_ES: &str = "Recibirás una cadena de correos electrónicos. \
    Responde SOLO en español. \
    Devuelve un objeto JSON con las siguientes claves: \
    summary - un resumen breve del hilo; \
    people - los nombres de todas las personas involucradas; \
    actions - puntos de acción en viñetas; \
    response - una posible plantilla de respuesta usando espacios en blanco (_____) para información faltante.";

/// Build the prompt for one email chain. The email text is passed through verbatim.
pub fn build_query(language: ReplyLanguage, email_chain: &str) -> ModelQuery {
    let (system, task, label) = match language {
        ReplyLanguage::English => (SYSTEM_INSTRUCTION_EN, TASK_INSTRUCTIONS_EN, "Email chain:"),
        ReplyLanguage::Spanish => (SYSTEM_INSTRUCTION_ES, TASK_INSTRUCTIONS_ES, "Cadena de correos:"),
    };

    ModelQuery {
        system_instruction: system.to_string(),
        user_prompt: format!("{task}\n\n{label}\n{email_chain}"),
    }
}
