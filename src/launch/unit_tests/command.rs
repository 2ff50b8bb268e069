use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::launch::{
    command::{LaunchCommand, resolve_program},
    config::LaunchConfig,
};

fn example_config() -> LaunchConfig {
    LaunchConfig::new("ClusterServer.exe")
        .ports(8060..8062)
        .label("qqq")
        .delays([10, 100])
}

#[test]
fn one_command_per_port_in_order() {
    let commands = LaunchConfig::default().build_commands().unwrap();

    assert_eq!(commands.len(), 20);
    let ports: Vec<u16> = commands.iter().map(|c| c.port).collect();
    assert_eq!(ports, (8060..8080).collect::<Vec<u16>>());

    let unique: HashSet<u16> = ports.iter().copied().collect();
    assert_eq!(unique.len(), commands.len());
}

#[test]
fn example_range_builds_two_commands() {
    let commands = example_config().build_commands().unwrap();
    assert_eq!(commands.len(), 2);

    for (command, port) in commands.iter().zip([8060, 8061]) {
        let line = command.command_line();
        let prefix = format!("ClusterServer.exe -p {port} -n qqq -d ");
        assert!(line.starts_with(&prefix), "unexpected command line: {line}");

        let delay = &line[prefix.len()..];
        assert!(delay == "10" || delay == "100", "unexpected delay: {delay}");
    }
}

#[test]
fn port_and_label_appear_once() {
    let commands = LaunchConfig::default().build_commands().unwrap();

    for command in &commands {
        let args = command.args();
        assert_eq!(
            args.iter().filter(|a| **a == command.port.to_string()).count(),
            1
        );
        assert_eq!(args.iter().filter(|a| a.as_str() == "qqq").count(), 1);
        assert_eq!(
            command.command_line().matches(&command.port.to_string()).count(),
            1
        );
    }
}

#[test]
fn delays_are_always_candidates() {
    let config = LaunchConfig::default().ports(1000..1500).delays([3, 30, 300]);
    let mut rng = StdRng::seed_from_u64(42);
    let commands = config.build_commands_with(&mut rng).unwrap();

    assert!(commands.iter().all(|c| [3, 30, 300].contains(&c.delay)));

    // 500 picks from 3 candidates should hit every one
    let seen: HashSet<u64> = commands.iter().map(|c| c.delay).collect();
    assert_eq!(seen.len(), 3);
}

#[test]
fn single_candidate_is_always_picked() {
    let commands = example_config().delays([3000]).build_commands().unwrap();
    assert!(commands.iter().all(|c| c.delay == 3000));
}

#[test]
fn same_seed_same_delays() {
    let config = LaunchConfig::default();
    let first = config
        .build_commands_with(&mut StdRng::seed_from_u64(9))
        .unwrap();
    let second = config
        .build_commands_with(&mut StdRng::seed_from_u64(9))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn async_flag_is_opt_in() {
    let plain = LaunchCommand::new(&example_config(), 8060, 10);
    assert_eq!(plain.args(), ["-p", "8060", "-n", "qqq", "-d", "10"]);
    assert!(!plain.command_line().contains("-a"));

    let with_async = LaunchCommand::new(&example_config().async_mode(true), 8061, 100);
    assert_eq!(
        with_async.command_line(),
        "ClusterServer.exe -p 8061 -n qqq -d 100 -a"
    );
}

#[test]
fn display_matches_command_line() {
    let command = LaunchCommand::new(&example_config(), 8060, 10);
    assert_eq!(command.to_string(), command.command_line());
}

#[test]
fn replica_address() {
    let command = LaunchCommand::new(&example_config(), 8061, 10);
    assert_eq!(command.replica_address("127.0.0.1"), "http://127.0.0.1:8061/qqq/");
}

#[test]
fn top_of_port_space() {
    let commands = example_config().ports(65534..65535).build_commands().unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].port, 65534);
}

#[test]
fn bare_program_in_working_dir_resolves_to_it() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ClusterServer.exe"), "").unwrap();

    let resolved = resolve_program("ClusterServer.exe", dir.path().to_str());
    assert!(resolved.is_absolute());
    assert_eq!(resolved, dir.path().join("ClusterServer.exe"));
}

#[test]
fn bare_program_not_in_working_dir_is_left_for_path_search() {
    let dir = tempfile::tempdir().unwrap();

    let resolved = resolve_program("ClusterServer.exe", dir.path().to_str());
    assert_eq!(resolved, std::path::PathBuf::from("ClusterServer.exe"));
}

#[test]
fn program_with_separator_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("bin")).unwrap();
    std::fs::write(dir.path().join("bin").join("server"), "").unwrap();

    let resolved = resolve_program("bin/server", dir.path().to_str());
    assert_eq!(resolved, std::path::PathBuf::from("bin/server"));
}

#[test]
fn directory_with_program_name_is_not_resolved() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("server")).unwrap();

    let resolved = resolve_program("server", dir.path().to_str());
    assert_eq!(resolved, std::path::PathBuf::from("server"));
}
