//! Command grammar
//!
//! A closed set of literal command forms. Arguments are positional tokens
//! after whitespace splitting; anything that doesn't fit is `Unknown`.

/// A parsed terminal command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    GetPods,
    Logs(String),
    DescribePod(String),
    EditDeployment(String),
    Unknown(String),
}

impl Command {
    /// Classify one input line. Leading/trailing whitespace is ignored.
    pub fn parse(line: &str) -> Self {
        let raw = line.trim();
        let parts: Vec<&str> = raw.split_whitespace().collect();

        match parts.as_slice() {
            ["help"] => Command::Help,
            ["clear"] => Command::Clear,
            ["kubectl", "get", "pods"] => Command::GetPods,
            ["kubectl", "logs", name, ..] => Command::Logs(name.to_string()),
            ["kubectl", "describe", "pod", name, ..] => Command::DescribePod(name.to_string()),
            ["kubectl", "edit", "deployment", name, ..] => Command::EditDeployment(name.to_string()),
            _ => Command::Unknown(raw.to_string()),
        }
    }

    /// Whether running this command can change cluster state
    pub fn is_mutating(&self) -> bool {
        matches!(self, Command::EditDeployment(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_forms() {
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("  clear  "), Command::Clear);
        assert_eq!(Command::parse("kubectl get pods"), Command::GetPods);
        assert_eq!(Command::parse("kubectl   get\tpods"), Command::GetPods);
    }

    #[test]
    fn extracts_positional_names() {
        assert_eq!(
            Command::parse("kubectl logs auth-service"),
            Command::Logs("auth-service".to_string())
        );
        assert_eq!(
            Command::parse("kubectl describe pod auth extra"),
            Command::DescribePod("auth".to_string())
        );
        assert_eq!(
            Command::parse("kubectl edit deployment auth-service"),
            Command::EditDeployment("auth-service".to_string())
        );
    }

    #[test]
    fn requires_kubectl_prefix() {
        assert_eq!(Command::parse("get pods"), Command::Unknown("get pods".to_string()));
        assert_eq!(Command::parse("logs auth"), Command::Unknown("logs auth".to_string()));
    }

    #[test]
    fn missing_name_is_unknown() {
        assert_eq!(Command::parse("kubectl logs"), Command::Unknown("kubectl logs".to_string()));
        assert_eq!(
            Command::parse("kubectl describe pod"),
            Command::Unknown("kubectl describe pod".to_string())
        );
    }

    #[test]
    fn near_misses_are_unknown() {
        assert_eq!(Command::parse("get pod"), Command::Unknown("get pod".to_string()));
        assert_eq!(Command::parse("kubectl get pod"), Command::Unknown("kubectl get pod".to_string()));
        assert_eq!(Command::parse("help me"), Command::Unknown("help me".to_string()));
        assert_eq!(Command::parse("HELP"), Command::Unknown("HELP".to_string()));
    }

    #[test]
    fn only_edit_mutates() {
        assert!(Command::EditDeployment("x".into()).is_mutating());
        assert!(!Command::GetPods.is_mutating());
        assert!(!Command::Logs("x".into()).is_mutating());
    }
}
