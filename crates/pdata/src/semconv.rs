//! OpenTelemetry semantic-convention attribute keys consulted by the
//! converters (v1.8.0 names).

pub const SERVICE_NAME: &str = "service.name";

pub const PROCESS_PID: &str = "process.pid";
pub const PROCESS_EXECUTABLE_NAME: &str = "process.executable.name";
pub const PROCESS_EXECUTABLE_PATH: &str = "process.executable.path";
pub const PROCESS_COMMAND_ARGS: &str = "process.command_args";
pub const PROCESS_RUNTIME_NAME: &str = "process.runtime.name";
pub const PROCESS_RUNTIME_VERSION: &str = "process.runtime.version";

pub const CONTAINER_ID: &str = "container.id";
pub const CONTAINER_IMAGE_NAME: &str = "container.image.name";
pub const CONTAINER_NAME: &str = "container.name";

pub const HOST_NAME: &str = "host.name";
pub const OS_TYPE: &str = "os.type";

pub const TELEMETRY_SDK_LANGUAGE: &str = "telemetry.sdk.language";
pub const TELEMETRY_SDK_LANGUAGE_GO: &str = "go";
pub const TELEMETRY_SDK_LANGUAGE_JAVA: &str = "java";
pub const TELEMETRY_SDK_LANGUAGE_PYTHON: &str = "python";
