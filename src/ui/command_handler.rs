// ui/command_handler.rs

use crate::model::{ImagePayload, SubmitError};
use crate::search::GenerativeSearch;
use crate::ui::render::render_state;
use crate::ui::session::SearchSession;

use std::path::PathBuf;
use tracing::{info, warn};

pub const HELP_TEXT: &str = "الأوامر:\n\
    <اسم المنتج>      البحث عن أرخص سعر\n\
    :image <المسار>   إرفاق صورة للمنتج (سطر فارغ بعدها يبحث بالصورة فقط)\n\
    :clear           إزالة الصورة المرفقة\n\
    :help            عرض هذه القائمة\n\
    :quit            خروج\n";

// Screen text. The error enums keep English messages for the log.
pub const BUSY_TEXT: &str = "جاري البحث بالفعل، انتظر حتى تظهر النتائج.\n";
pub const IMAGE_ATTACHED_TEXT: &str = "تم اختيار صورة للبحث\n";
pub const IMAGE_FAILED_TEXT: &str = "تعذر تحميل الصورة، تأكد من المسار وحاول مرة أخرى.\n";
pub const IMAGE_CLEARED_TEXT: &str = "تمت إزالة الصورة.\n";

fn unknown_command_text(text: &str) -> String {
    format!("أمر غير معروف: {}. اكتب :help لعرض الأوامر.\n", text)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    AttachImage(PathBuf),
    ClearImage,
    Help,
    Quit,
    Unknown(String),
}

pub enum Flow {
    Continue(String),
    Quit,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Search(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match (name, arg) {
        ("image", path) if !path.is_empty() => Command::AttachImage(PathBuf::from(path)),
        ("clear", _) => Command::ClearImage,
        ("help", _) => Command::Help,
        ("quit" | "q", _) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Applies one command to the session and returns what to print.
pub fn handle_command<C>(
    command: Command,
    session: &mut SearchSession<C>,
    image: &mut Option<ImagePayload>,
) -> Flow
where
    C: GenerativeSearch + 'static,
{
    info!("Handling command: {:?}", command);
    match command {
        Command::Search(query) => match session.submit(&query, image.clone()) {
            Ok(()) => Flow::Continue(render_state(session.state())),
            Err(SubmitError::InputEmpty) => Flow::Continue(String::new()),
            Err(SubmitError::Busy) => Flow::Continue(BUSY_TEXT.to_string()),
        },
        Command::AttachImage(path) => match ImagePayload::from_file(&path) {
            Ok(payload) => {
                info!("Attached {} as {}", path.display(), payload.mime_type);
                *image = Some(payload);
                Flow::Continue(IMAGE_ATTACHED_TEXT.to_string())
            }
            Err(e) => {
                warn!("Image attach failed: {}", e);
                Flow::Continue(IMAGE_FAILED_TEXT.to_string())
            }
        },
        Command::ClearImage => {
            *image = None;
            Flow::Continue(IMAGE_CLEARED_TEXT.to_string())
        }
        Command::Help => Flow::Continue(HELP_TEXT.to_string()),
        Command::Quit => Flow::Quit,
        Command::Unknown(text) => Flow::Continue(unknown_command_text(&text)),
    }
}
