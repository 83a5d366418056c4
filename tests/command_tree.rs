use std::sync::{Arc, Mutex};

use cmdtree::commands::{
    Command, CommandNode, CommandSignature, CommandType, DispatchError, Dispatcher,
    RegistrationError, help_lines,
};

#[derive(Default)]
struct Log(Mutex<Vec<String>>);

impl Log {
    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

struct Echo(String);

impl Command<Log> for Echo {
    fn execute(&self, ctx: &Log, label: &str, args: &[String]) {
        ctx.0
            .lock()
            .unwrap()
            .push(format!("{} via {label}: {}", self.0, args.join(",")));
    }
}

fn node(sig: CommandSignature) -> CommandNode<Log> {
    let name = sig.name.clone();
    CommandNode::new(sig, Echo(name))
}

fn tokens(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

#[test]
fn give_take_example() {
    let mut parent = node(CommandSignature::root("inv"));
    parent
        .attach(node(CommandSignature::sub("give").with_aliases(["g"])))
        .unwrap();

    let b = parent.attach(node(CommandSignature::sub("g"))).unwrap_err();
    assert!(matches!(b, RegistrationError::NameAliasConflict { .. }));

    let c = parent
        .attach(node(CommandSignature::sub("take").with_aliases(["g"])))
        .unwrap_err();
    assert!(matches!(c, RegistrationError::AliasAliasConflict { .. }));

    parent
        .attach(node(CommandSignature::sub("take").with_aliases(["t"])))
        .unwrap();
    assert_eq!(parent.children().len(), 2);
}

#[test]
fn error_messages_name_the_command() {
    let mut parent = node(CommandSignature::root("inv"));
    parent
        .attach(node(CommandSignature::sub("give").with_aliases(["g"])))
        .unwrap();

    let err = parent.attach(node(CommandSignature::sub("give"))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot register give: Name already registered as subcommand"
    );

    let err = parent
        .attach(node(CommandSignature::new("top", CommandType::Root)))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot register top: Command type must be SUB_COMMAND, found ROOT"
    );
}

#[test]
fn nested_tree_dispatch_and_help() {
    let mut pr = node(CommandSignature::sub("pr").with_aliases(["p"])).with_help("Pull requests");
    pr.attach(node(CommandSignature::sub("open").with_aliases(["o"])))
        .unwrap()
        .attach(node(CommandSignature::sub("merge").with_aliases(["m"])))
        .unwrap();

    let mut workspace = node(CommandSignature::sub("workspace").with_aliases(["ws"]));
    // same labels as under `pr`, allowed because they are not siblings
    workspace
        .attach(node(CommandSignature::sub("open").with_aliases(["o"])))
        .unwrap();

    let mut git = node(CommandSignature::root("git")).with_help("Repository tools");
    git.attach(pr).unwrap().attach(workspace).unwrap();

    let mut dispatcher = Dispatcher::new();
    dispatcher.register(git).unwrap();

    let log = Log::default();
    dispatcher.dispatch(&log, &tokens("git p m 42")).unwrap();
    dispatcher.dispatch(&log, &tokens("git ws o main")).unwrap();
    dispatcher.dispatch(&log, &tokens("git status")).unwrap();

    assert_eq!(
        log.entries(),
        vec!["merge via m: 42", "open via o: main", "git via git: status"]
    );

    assert_eq!(
        dispatcher.dispatch(&log, &tokens("hg status")),
        Err(DispatchError::UnknownCommand("hg".to_string()))
    );

    let root = dispatcher.find_root("git").unwrap();
    let lines = help_lines(root.as_ref());
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("git") && lines[0].ends_with("Repository tools"));
    assert!(lines[1].starts_with("  pr (p)") && lines[1].ends_with("Pull requests"));
    assert!(lines[2].starts_with("    merge (m)"));
}

#[test]
fn snapshots_can_be_shared_across_threads() {
    let mut parent = node(CommandSignature::root("inv"));
    parent.attach(node(CommandSignature::sub("give"))).unwrap();
    parent.attach(node(CommandSignature::sub("take"))).unwrap();

    let snapshot = parent.children();
    parent.attach(node(CommandSignature::sub("list"))).unwrap();

    let parent = Arc::new(parent);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let parent = Arc::clone(&parent);
            std::thread::spawn(move || parent.children().len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
    assert_eq!(snapshot.len(), 2);
}
